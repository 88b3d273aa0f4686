use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::session::Session;

const LOGIN_HTML: &str = include_str!("../templates/login.html");
const REGISTER_HTML: &str = include_str!("../templates/register.html");
const CHAT_HTML: &str = include_str!("../templates/chat.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
}

/// Fill a form page, optionally showing a failure notice.
pub fn render(page: Page, error: Option<&str>) -> Html<String> {
    let template = match page {
        Page::Login => LOGIN_HTML,
        Page::Register => REGISTER_HTML,
    };
    let notice = error
        .map(|msg| format!(r#"<p class="error">{msg}</p>"#))
        .unwrap_or_default();

    Html(template.replace("{{error}}", &notice))
}

/// GET /
pub async fn index(session: Session) -> Redirect {
    match session {
        Session::Authenticated(_) => Redirect::to("/chat"),
        Session::Anonymous => Redirect::to("/login"),
    }
}

/// GET /login
pub async fn login_page() -> Html<String> {
    render(Page::Login, None)
}

/// GET /register
pub async fn register_page() -> Html<String> {
    render(Page::Register, None)
}

/// GET /chat: browsers without a session are sent to the login page.
pub async fn chat_page(session: Session) -> Response {
    match session {
        Session::Authenticated(_) => Html(CHAT_HTML).into_response(),
        Session::Anonymous => Redirect::to("/login").into_response(),
    }
}
