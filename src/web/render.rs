use crate::models::Page;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value placed inside a query string of an `href`.
fn escape_query(text: &str) -> String {
    escape_html(&urlencoding::encode(text))
}

/// Index page: every note with View/Edit links and a Delete button.
pub fn list_page(pages: &[Page]) -> String {
    let mut html = String::from("<h1>Notes List</h1><a href=\"/create\">Create New Note</a><br><ul>");
    for p in pages {
        let q = escape_query(&p.id);
        html.push_str(&format!(
            "<li>{} <a href=\"/read?id={q}\">View</a> <a href=\"/edit?id={q}\">Edit</a> \
             <form action=\"/delete\" method=\"post\" style=\"display:inline;\">\
             <input type=\"hidden\" name=\"id\" value=\"{}\"/>\
             <button type=\"submit\">Delete</button></form></li>",
            escape_html(&p.title),
            escape_html(&p.id),
        ));
    }
    html.push_str("</ul>");
    html
}

pub fn create_form() -> String {
    String::from(
        "<h1>Create Note</h1><form method=\"post\">\
         <label>Title: <input name=\"title\"/></label><br>\
         <label>Content: <textarea name=\"content\"></textarea></label><br>\
         <button type=\"submit\">Create</button>\
         </form>",
    )
}

/// Title and storage-format body, both shown as text.
pub fn read_page(page: &Page) -> String {
    format!(
        "<h1>{}</h1><div>{}</div><a href=\"/\">Back</a>",
        escape_html(&page.title),
        escape_html(&page.body.storage.value),
    )
}

pub fn edit_form(page: &Page) -> String {
    format!(
        "<h1>Edit Note</h1><form method=\"post\">\
         <label>Title: <input name=\"title\" value=\"{}\"/></label><br>\
         <label>Content: <textarea name=\"content\">{}</textarea></label><br>\
         <button type=\"submit\">Update</button>\
         </form>",
        escape_html(&page.title),
        escape_html(&page.body.storage.value),
    )
}
