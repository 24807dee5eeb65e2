// src/application/copy.rs
//
// User-facing texts. All of them are HTML (parse_mode=HTML) and contain no
// user input, so they go out without escaping.

pub const START_MESSAGE: &str = "Привет! Я бот, который поможет тебе найти фильмы и сериалы. 🎬🍿
Просто напиши мне название фильма или сериала, и я предоставлю тебе информацию о нем,
рейтинг 🌟 и ссылки для просмотра 🔗.
Используй /help, чтобы узнать больше о моих возможностях.";

pub const HELP_MESSAGE: &str = "Я бот для поиска информации о фильмах и сериалах.

<b>Доступные команды:</b>
- /start: Начать работу с ботом и получить приветствие! 👋
- /help: Получить информацию о том, как использовать бота. ℹ️
- /history: Показать историю твоих поисковых запросов. 📜
- /stats: Показать статистику фильмов, которые ты искал. 📊

Просто отправь мне название фильма или сериала, и я предоставлю тебе информацию о нем, рейтинг 🌟 и ссылки для просмотра 🔗.

<b>Пример использования:</b>
Чтобы найти информацию о фильме \"Interstellar\", просто отправь мне сообщение \"Interstellar\".

Приятного просмотра! 😊";

pub const EMPTY_HISTORY: &str = "Твоя история поисков пуста. Начни искать фильмы! 🎥";
pub const EMPTY_STATS: &str = "У тебя нет статистики просмотров. Начни искать фильмы! 🎥";
pub const STALE_SEARCH: &str = "Результаты поиска устарели. Отправь запрос ещё раз.";
pub const NOT_FOUND_LABEL: &str = "Не найдено";
pub const RATING_LABEL: &str = "Рейтинг";
pub const WATCH_LABEL: &str = "🔗Посмотреть";

pub fn history_header(page: usize, total_pages: usize) -> String {
    format!("<b>Твоя история поисков (страница {}/{}):</b>\n", page, total_pages)
}

pub fn stats_header(page: usize, total_pages: usize) -> String {
    format!("<b>Статистика фильмов (страница {}/{}):</b>\n", page, total_pages)
}

pub fn shown_times(count: u32) -> String {
    format!("показан {} раз(а)", count)
}
