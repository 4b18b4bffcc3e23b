//! HTML rendering of the view descriptors produced by the core pipeline.

use std::fmt::Write as _;

use toolboard_core::catalog::{DASHBOARD_SUBTITLE, DASHBOARD_TIP, DASHBOARD_TITLE, ToolCard};
use toolboard_core::error::ConfigError;
use toolboard_core::navigation::{APP_PARAM, Navigation};
use toolboard_core::registry::{Block, Notice, NoticeLevel};
use toolboard_core::view::{Page, ToolBody, View};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6fa; color: #1f2330; }
main { max-width: 1100px; margin: 0 auto; padding: 2rem 1.25rem; }
h1 { font-size: 2rem; margin: 0 0 .25rem; }
.subtitle { color: #667; margin: 0 0 1.5rem; }
.topbar { display: flex; justify-content: space-between; align-items: center; gap: 1rem; }
.login { max-width: 400px; margin: 12vh auto; }
.login label { display: block; margin-top: 12px; font-weight: 500; }
.login input[type="text"], .login input[type="password"] { width: 100%; padding: 8px; margin-top: 4px; box-sizing: border-box; }
button { padding: 10px 24px; background: #111; color: #fff; border: none; cursor: pointer; font-size: 1em; border-radius: 8px; }
.login button { margin-top: 20px; width: 100%; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 2rem; }
a.card { display: flex; flex-direction: column; justify-content: space-between; min-height: 280px; padding: 2.5rem; border-radius: 16px; color: #fff; text-decoration: none; box-shadow: 0 10px 30px rgba(0,0,0,.2); transition: transform .3s ease, box-shadow .3s ease; }
a.card:hover { transform: translateY(-8px); box-shadow: 0 15px 40px rgba(0,0,0,.3); }
a.card.linkedin { background: linear-gradient(135deg, #0077B5 0%, #00A0DC 100%); }
a.card.keywords { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); }
.card-icon { font-size: 3rem; }
.card-title { font-size: 1.8rem; margin: .5rem 0; }
.card-arrow { font-weight: 600; opacity: .9; }
.notice { padding: .75rem 1rem; border-radius: 8px; margin: 1rem 0; }
.notice.info { background: #e8f0fe; color: #1a3d7c; }
.notice.error { background: #fdecea; color: #8a1c12; }
.tool { display: grid; grid-template-columns: 220px 1fr; gap: 2rem; }
.sidebar { background: #fff; border-radius: 12px; padding: 1rem; height: fit-content; }
.sidebar button { width: 100%; }
.back { display: inline-block; margin-bottom: 1rem; }
"#;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Address of the view described by `navigation`.
pub fn navigation_href(navigation: &Navigation) -> String {
    match navigation.app() {
        None => "/".to_string(),
        Some(app) => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair(APP_PARAM, app)
                .finish();
            format!("/?{query}")
        }
    }
}

/// The `app` value carried by a raw query string. A repeated key resolves to
/// its last occurrence.
pub fn app_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .filter(|(key, _)| key == APP_PARAM)
        .last()
        .map(|(_, value)| value.into_owned())
}

/// Render a pipeline result. `requested` is the navigation the request
/// arrived with; when the router replaced it, the address bar is rewritten
/// to match.
pub fn render_page(page: &Page, requested: &Navigation) -> String {
    let mut body = match &page.view {
        View::Login { rejected } => login_body(*rejected, &page.navigation),
        View::Dashboard { cards, notices } => dashboard_body(cards, notices),
        View::Tool { card, body } => tool_body(card, body, &page.navigation),
    };

    if page.navigation != *requested {
        let _ = write!(
            body,
            r#"<script>history.replaceState(null, "", "{}");</script>"#,
            html_escape(&navigation_href(&page.navigation))
        );
    }

    let title = match &page.view {
        View::Tool { card, .. } => format!("{} · {DASHBOARD_TITLE}", card.label),
        _ => DASHBOARD_TITLE.to_string(),
    };
    layout(&title, &body)
}

pub fn config_error_page(err: &ConfigError) -> String {
    let body = format!(
        r#"<section class="login">
<h1>🚀 {title}</h1>
{notice}
<p class="subtitle">Set <code>APP_USERNAME</code> and <code>APP_PASSWORD</code> in the service environment and restart it.</p>
</section>"#,
        title = html_escape(DASHBOARD_TITLE),
        notice = notice_html(&Notice::error(format!("⚠️ {err}"))),
    );
    layout(DASHBOARD_TITLE, &body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<main>
{body}
</main>
</body>
</html>"#,
        title = html_escape(title),
    )
}

fn notice_html(notice: &Notice) -> String {
    let class = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Error => "error",
    };
    format!(
        r#"<div class="notice {class}" role="{role}">{message}</div>"#,
        role = if class == "error" { "alert" } else { "status" },
        message = html_escape(&notice.message),
    )
}

/// Hidden form field carrying the current navigation, if any.
fn app_field(navigation: &Navigation) -> String {
    navigation
        .app()
        .map(|app| {
            format!(
                r#"<input type="hidden" name="{APP_PARAM}" value="{}">"#,
                html_escape(app)
            )
        })
        .unwrap_or_default()
}

fn logout_form(navigation: &Navigation) -> String {
    format!(
        r#"<form method="POST" action="/logout">{}<button type="submit">🚪 Logout</button></form>"#,
        app_field(navigation)
    )
}

fn login_body(rejected: bool, navigation: &Navigation) -> String {
    let app_field = app_field(navigation);
    let error = if rejected {
        notice_html(&Notice::error("😕 Username or password incorrect"))
    } else {
        String::new()
    };

    format!(
        r#"<section class="login">
<h1>🚀 {title}</h1>
<p class="subtitle">Please login to continue</p>
<form method="POST" action="/login">
{app_field}
<label>Username<input type="text" name="username" placeholder="Enter username" autocomplete="username" required autofocus></label>
<label>Password<input type="password" name="password" placeholder="Enter password" autocomplete="current-password" required></label>
<button type="submit">Login</button>
</form>
{error}
</section>"#,
        title = html_escape(DASHBOARD_TITLE),
    )
}

fn dashboard_body(cards: &[ToolCard], notices: &[Notice]) -> String {
    let mut out = String::new();
    for notice in notices {
        out.push_str(&notice_html(notice));
    }

    let _ = write!(
        out,
        r#"<header class="topbar"><div><h1>🚀 {title}</h1><p class="subtitle">{subtitle}</p></div>{logout}</header>
<section class="cards">"#,
        title = html_escape(DASHBOARD_TITLE),
        subtitle = html_escape(DASHBOARD_SUBTITLE),
        logout = logout_form(&Navigation::dashboard()),
    );

    for card in cards {
        let features: String = card
            .features
            .iter()
            .map(|f| format!("<li>{}</li>", html_escape(f)))
            .collect();
        let _ = write!(
            out,
            r#"
<a class="card {key}" href="{href}">
<div><span class="card-icon">{icon}</span>
<h2 class="card-title">{label}</h2>
<p class="card-description">{description}</p>
<ul class="card-features">{features}</ul></div>
<div class="card-arrow">→ {cta}</div>
</a>"#,
            key = card.key.as_str(),
            href = html_escape(&navigation_href(&Navigation::open(card.key))),
            icon = card.icon,
            label = html_escape(card.label),
            description = html_escape(card.description),
            cta = html_escape(card.call_to_action),
        );
    }

    out.push_str("\n</section>\n");
    out.push_str(&notice_html(&Notice::info(format!("💡 Tip: {DASHBOARD_TIP}"))));
    out
}

fn tool_body(card: &ToolCard, body: &ToolBody, navigation: &Navigation) -> String {
    let content = match body {
        ToolBody::Rendered(frame) => frame.blocks().iter().map(block_html).collect(),
        ToolBody::Failed(err) => notice_html(&Notice::error(err.to_string())),
    };

    format!(
        r#"<a class="back" href="/">← Back to Dashboard</a>
<div class="tool">
<aside class="sidebar">
<h3>Navigation</h3>
{logout}
<hr>
<small>Currently viewing:</small>
{viewing}
</aside>
<section class="tool-body" data-app="{key}">
{content}
</section>
</div>"#,
        logout = logout_form(navigation),
        viewing = notice_html(&Notice::info(format!("{} {}", card.icon, card.label))),
        key = card.key.as_str(),
    )
}

fn block_html(block: &Block) -> String {
    match block {
        Block::Heading(text) => format!("<h2>{}</h2>", html_escape(text)),
        Block::Paragraph(text) => format!("<p>{}</p>", html_escape(text)),
        Block::Bullets(items) => {
            let items: String = items
                .iter()
                .map(|item| format!("<li>{}</li>", html_escape(item)))
                .collect();
            format!("<ul>{items}</ul>")
        }
        Block::Notice(notice) => notice_html(notice),
    }
}

#[cfg(test)]
mod tests {
    use toolboard_core::catalog::{self, CATALOG};
    use toolboard_core::error::RenderError;
    use toolboard_core::navigation::ToolKey;
    use toolboard_core::registry::Frame;

    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn app_param_takes_the_last_occurrence() {
        assert_eq!(app_param(Some("app=linkedin&app=crm")), Some("crm".to_string()));
        assert_eq!(app_param(Some("x=1&app=%20linkedin")), Some(" linkedin".to_string()));
        assert_eq!(app_param(Some("app=")), Some(String::new()));
        assert_eq!(app_param(Some("other=1")), None);
        assert_eq!(app_param(None), None);
    }

    #[test]
    fn navigation_href_encodes_the_key() {
        assert_eq!(navigation_href(&Navigation::dashboard()), "/");
        assert_eq!(
            navigation_href(&Navigation::open(ToolKey::Linkedin)),
            "/?app=linkedin"
        );
        assert_eq!(
            navigation_href(&Navigation::from_param(Some("a&b c"))),
            "/?app=a%26b+c"
        );
    }

    #[test]
    fn login_page_carries_requested_app_and_error() {
        let nav = Navigation::open(ToolKey::Keywords);
        let page = Page {
            view: View::Login { rejected: true },
            navigation: nav.clone(),
        };
        let html = render_page(&page, &nav);
        assert!(html.contains(r#"name="app" value="keywords""#));
        assert!(html.contains("Username or password incorrect"));
        assert!(!html.contains("card-title"));
        assert!(!html.contains("replaceState"));
    }

    #[test]
    fn dashboard_links_every_card() {
        let page = Page {
            view: View::Dashboard {
                cards: &CATALOG,
                notices: Vec::new(),
            },
            navigation: Navigation::dashboard(),
        };
        let html = render_page(&page, &Navigation::dashboard());
        assert!(html.contains(r#"href="/?app=linkedin""#));
        assert!(html.contains(r#"href="/?app=keywords""#));
        assert!(html.contains("LinkedIn Analysis"));
        assert!(html.contains("Keyword Research"));
        assert!(html.contains(r#"action="/logout""#));
    }

    #[test]
    fn replaced_navigation_rewrites_address() {
        let page = Page {
            view: View::Dashboard {
                cards: &CATALOG,
                notices: vec![Notice::error("Unknown app: <crm>")],
            },
            navigation: Navigation::dashboard(),
        };
        let html = render_page(&page, &Navigation::from_param(Some("<crm>")));
        assert!(html.contains(r#"history.replaceState(null, "", "/")"#));
        assert!(html.contains("Unknown app: &lt;crm&gt;"));
    }

    #[test]
    fn tool_page_shows_error_in_place_and_keeps_affordances() {
        let nav = Navigation::open(ToolKey::Linkedin);
        let page = Page {
            view: View::Tool {
                card: catalog::card(ToolKey::Linkedin),
                body: ToolBody::Failed(RenderError::Unavailable(ToolKey::Linkedin)),
            },
            navigation: nav.clone(),
        };
        let html = render_page(&page, &nav);
        assert!(html.contains("LinkedIn Analysis module not found"));
        assert!(html.contains("Back to Dashboard"));
        assert!(html.contains(r#"action="/logout"><input type="hidden" name="app" value="linkedin">"#));
    }

    #[test]
    fn tool_page_renders_frame_blocks() {
        let mut frame = Frame::new();
        frame
            .heading("Voice profile")
            .bullets(["one", "two"])
            .notice(Notice::info("heads up"));
        let nav = Navigation::open(ToolKey::Keywords);
        let page = Page {
            view: View::Tool {
                card: catalog::card(ToolKey::Keywords),
                body: ToolBody::Rendered(frame),
            },
            navigation: nav.clone(),
        };
        let html = render_page(&page, &nav);
        assert!(html.contains("<h2>Voice profile</h2>"));
        assert!(html.contains("<ul><li>one</li><li>two</li></ul>"));
        assert!(html.contains("Currently viewing:"));
    }
}
