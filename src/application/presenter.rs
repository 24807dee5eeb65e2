// src/application/presenter.rs
//
// Presentation Adapter - NavigationContext → DisplayPayload
//
// CRITICAL RULES:
// - Every user or provider supplied string is escaped before it touches markup
// - Film pages stay within the transport limit; only the synopsis is cut
// - Links are resolved here, for the one film being shown, never up front

use std::sync::Arc;

use crate::domain::film::{FilmCandidate, FilmDetails, StreamingLink, FILM_NOT_FOUND_MESSAGE};
use crate::domain::history::{SearchRecord, UserStat};
use crate::domain::navigation::{ContextKind, NavigationContext, NavigationControls, PageView};
use crate::domain::DisplayPayload;
use crate::services::LinkResolver;

use super::copy;

/// Caption limit for messages with an image
pub const CAPTION_LIMIT: usize = 1024;
/// Limit for plain text messages
pub const MESSAGE_LIMIT: usize = 4096;

const KINOPOISK_FILM_URL: &str = "https://www.kinopoisk.ru/film/";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct Presenter {
    links: Arc<LinkResolver>,
}

impl Presenter {
    pub fn new(links: Arc<LinkResolver>) -> Self {
        Self { links }
    }

    /// Render the current page. Takes the context by value since rendering
    /// re-clamps the page index.
    pub async fn render(&self, context: NavigationContext) -> DisplayPayload {
        match context {
            NavigationContext::History(mut pager) => match pager.current() {
                Some(view) => render_history(&view),
                None => DisplayPayload::text(copy::EMPTY_HISTORY),
            },
            NavigationContext::Stats(mut pager) => match pager.current() {
                Some(view) => render_stats(&view),
                None => DisplayPayload::text(copy::EMPTY_STATS),
            },
            NavigationContext::SearchResults { mut results, .. } => {
                let Some((candidate, controls)) = results.current().and_then(|view| {
                    let candidate = view.items.first()?.clone();
                    Some((candidate, NavigationControls::for_view(ContextKind::Search, &view)))
                }) else {
                    return DisplayPayload::text(escape_html(FILM_NOT_FOUND_MESSAGE));
                };

                let links = self.links.resolve(&candidate).await;
                render_film(&candidate, &links).with_controls(controls)
            }
        }
    }
}

pub fn render_history(view: &PageView<'_, SearchRecord>) -> DisplayPayload {
    let mut body = copy::history_header(view.page + 1, view.total_pages);

    for (offset, record) in view.items.iter().enumerate() {
        let index = view.first_index + offset + 1;
        let when = record.timestamp.format(TIMESTAMP_FORMAT);
        match (&record.film_name, &record.film_year) {
            (Some(name), Some(year)) => body.push_str(&format!(
                "{}. {} ({}) - {}\n",
                index,
                escape_html(name),
                escape_html(year),
                when
            )),
            _ => body.push_str(&format!(
                "{}. {} ({}) - {}\n",
                index,
                copy::NOT_FOUND_LABEL,
                escape_html(&record.query),
                when
            )),
        }
    }

    DisplayPayload::text(body).with_controls(NavigationControls::for_view(ContextKind::History, view))
}

pub fn render_stats(view: &PageView<'_, UserStat>) -> DisplayPayload {
    let mut body = copy::stats_header(view.page + 1, view.total_pages);

    for (offset, stat) in view.items.iter().enumerate() {
        body.push_str(&format!(
            "{}. {} ({}) - {}\n",
            view.first_index + offset + 1,
            escape_html(&stat.film_name),
            escape_html(&stat.film_year),
            copy::shown_times(stat.count)
        ));
    }

    DisplayPayload::text(body).with_controls(NavigationControls::for_view(ContextKind::Stats, view))
}

/// Film page without controls
pub fn render_film(candidate: &FilmCandidate, links: &[StreamingLink]) -> DisplayPayload {
    let film = match candidate {
        FilmCandidate::Found(film) => film,
        FilmCandidate::NotFound { message } => {
            let mut payload = DisplayPayload::text(escape_html(message));
            payload.disable_link_preview = true;
            return payload;
        }
    };

    let image = film.poster_url.clone().filter(|url| !url.trim().is_empty());
    let limit = if image.is_some() { CAPTION_LIMIT } else { MESSAGE_LIMIT };

    DisplayPayload {
        body: film_caption(film, links, limit),
        image,
        controls: None,
        disable_link_preview: true,
    }
}

/// Title, rating, synopsis and links, with the synopsis cut so the whole
/// caption fits in `limit` characters
pub fn film_caption(film: &FilmDetails, links: &[StreamingLink], limit: usize) -> String {
    let mut head = String::new();

    if let Some((name, year)) = film.resolved_identity() {
        let title = format!("<b>{} ({})</b>", escape_html(&name), escape_html(&year));
        match film.provider_id {
            Some(id) => head.push_str(&format!("<a href=\"{}{}/\">{}</a>\n", KINOPOISK_FILM_URL, id, title)),
            None => head.push_str(&format!("{}\n", title)),
        }
    }

    if let Some(score) = film.score() {
        head.push_str(&format!("<b>{}</b>: {}\n", copy::RATING_LABEL, escape_html(score)));
    }

    let tail: String = links
        .iter()
        .map(|link| format!("<a href=\"{}\">{}</a>\n", escape_html(&link.url), copy::WATCH_LABEL))
        .collect();

    let mut caption = head;

    if let Some(description) = film.description.as_deref().filter(|d| !d.trim().is_empty()) {
        const OPEN: &str = "<blockquote>";
        const CLOSE: &str = "</blockquote>\n";
        let fixed = char_len(&caption) + char_len(&tail) + char_len(OPEN) + char_len(CLOSE);
        let budget = limit.saturating_sub(fixed);

        let synopsis = escape_within(description, budget);
        if !synopsis.is_empty() {
            caption.push_str(OPEN);
            caption.push_str(&synopsis);
            caption.push_str(CLOSE);
        }
    }

    caption.push_str(&tail);
    caption
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        push_escaped(&mut escaped, c);
    }
    escaped
}

/// Escape `text`, stopping before the escaped form exceeds `budget`
/// characters. Never splits an entity.
fn escape_within(text: &str, budget: usize) -> String {
    let mut escaped = String::new();
    let mut used = 0;
    let mut piece = String::with_capacity(8);

    for c in text.chars() {
        piece.clear();
        push_escaped(&mut piece, c);
        let cost = char_len(&piece);
        if used + cost > budget {
            break;
        }
        escaped.push_str(&piece);
        used += cost;
    }

    escaped
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#x27;"),
        other => out.push(other),
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
