/// Title used when neither an explicit title nor a level-1 heading exists.
pub const FALLBACK_TITLE: &str = "Document";

/// Wrap an HTML body in the fixed full-page shell.
///
/// `body` is inserted verbatim; every fragment already ends in a newline.
pub fn wrap_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         {body}</body>\n\
         </html>\n"
    )
}
