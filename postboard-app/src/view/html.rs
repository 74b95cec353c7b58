//! HTML rendering
//!
//! Every piece of user-provided text passes through [`escape_html`] before
//! it reaches markup.

use std::fmt::Write;

use postboard_core::domain::effect::Effect;

use super::{CreateFormView, ErrorView, PostDetail, PostRow, StatusLine, View};

/// Escape the five HTML-significant characters
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a view to an HTML fragment
pub fn render(view: &View) -> String {
    match view {
        View::Loading { message } => {
            format!(r#"<div class="loading">{}</div>"#, escape_html(message))
        }
        View::NoPosts => concat!(
            r#"<h2>Latest Posts</h2>"#,
            r##"<p>No posts yet… <a href="#/new">click here to create one</a>.</p>"##
        )
        .to_string(),
        View::PostList { rows } => render_list(rows),
        View::PostDetail(detail) => render_detail(detail),
        View::Create(form) => render_form(form),
        View::Error(error) => render_error(error),
    }
}

fn render_list(rows: &[PostRow]) -> String {
    let mut html = String::from(
        r#"<h2>Latest Posts</h2><table><thead><tr><th>Title</th><th>Published</th></tr></thead><tbody>"#,
    );
    for row in rows {
        let _ = write!(
            html,
            r#"<tr><td><a href="{}">{}</a></td><td>{}</td></tr>"#,
            escape_html(&row.link.fragment()),
            escape_html(&row.title),
            escape_html(&row.published)
        );
    }
    html.push_str("</tbody></table>");
    html
}

fn render_detail(detail: &PostDetail) -> String {
    let image = detail
        .image
        .as_ref()
        .map(|img| {
            format!(
                r#"<img class="post-image" src="{}" alt="{}" onerror="this.remove()"/>"#,
                escape_html(&img.src),
                escape_html(&img.alt)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="post"><h2>{}</h2><div class="post-body">{}<pre class="body">{}</pre></div><p><a href="{}">← Back</a></p></div>"#,
        escape_html(&detail.title),
        image,
        escape_html(&detail.body),
        escape_html(&detail.back.fragment())
    )
}

fn render_error(error: &ErrorView) -> String {
    format!(
        r#"<div class="card"><h2>{}</h2><p class="error">Could not reach the API.</p><p class="mono">{}</p><p><a href="{}">Create a post</a> or try again.</p></div>"#,
        escape_html(&error.heading),
        escape_html(&error.detail),
        escape_html(&error.create_link.fragment())
    )
}

fn render_form(form: &CreateFormView) -> String {
    let mut html = String::from(r#"<form id="postForm"><h2>Create New Post</h2>"#);
    let _ = write!(
        html,
        r#"<label>Title <input name="title" value="{}" required/></label><label>Body <textarea name="body" rows="8" required>{}</textarea></label><label>Image <input type="file" name="image" accept="image/*"/></label>"#,
        escape_html(&form.title),
        escape_html(&form.body)
    );

    if form.effects_visible {
        html.push_str(r#"<div id="effectsSection"><strong>Effects</strong><div>"#);
        for effect in Effect::ALL {
            let checked = if effect == form.effect { " checked" } else { "" };
            let _ = write!(
                html,
                r#"<label><input type="radio" name="effect" value="{}"{}/> {}</label>"#,
                effect.as_str(),
                checked,
                effect.label()
            );
        }
        html.push_str("</div></div>");
    }

    html.push_str(r#"<button type="submit">Create</button></form><div id="jobStatus">"#);
    if let Some(status) = &form.status {
        let class = match status {
            StatusLine::Progress(_) => "progress",
            StatusLine::Success(_) => "success",
            StatusLine::Error(_) => "error",
        };
        let _ = write!(
            html,
            r#"<div class="{}">{}</div>"#,
            class,
            escape_html(status.text())
        );
    }
    html.push_str("</div>");
    html
}
