use mime_guess::mime;
use std::path::Path;

/// Content-Type for a file under the docs root, guessed from its extension.
/// Text-like types get an explicit UTF-8 charset.
pub fn content_type(path: &Path) -> String {
    let guess = mime_guess::from_path(path).first_or(mime::APPLICATION_OCTET_STREAM);
    let (top, sub) = (guess.type_(), guess.subtype());
    let textual = top == mime::TEXT || top == mime::APPLICATION;

    if textual && sub == mime::JAVASCRIPT {
        "application/javascript; charset=utf-8".into()
    } else if textual && sub == mime::JSON {
        "application/json; charset=utf-8".into()
    } else if textual && sub == mime::XML {
        "application/xml; charset=utf-8".into()
    } else if top == mime::TEXT && sub == mime::PLAIN {
        "text/plain; charset=utf-8".into()
    } else if top == mime::TEXT && sub == mime::HTML {
        "text/html; charset=utf-8".into()
    } else if top == mime::TEXT && sub == mime::CSS {
        "text/css; charset=utf-8".into()
    } else {
        guess.essence_str().to_string()
    }
}
