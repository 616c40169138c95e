use regex::{Captures, Regex};

/// The Markdown collaborator: a pure text-to-HTML converter applied to
/// every non-raw text payload.
pub trait MarkdownConverter: Sync {
    fn convert(&self, text: &str) -> String;
}

/// The built-in converter: a small, line-oriented Markdown dialect with
/// headers, `~` list items, links, emphasis, code, superscript and `%(..)%`
/// images.
#[derive(Debug, Default)]
pub struct DefaultMarkdown;

impl MarkdownConverter for DefaultMarkdown {
    fn convert(&self, text: &str) -> String {
        markdown_to_html(text)
    }
}

lazy_static! {
    static ref HEADER_OPEN: Regex = Regex::new(r"(?m)^(\s*)(#{1,6} )").unwrap();
    static ref HEADER_LINE: Regex = Regex::new(r"(?m)^<h[0-9]>.*").unwrap();
    static ref LIST_MARKER: Regex = Regex::new(r"(?m)^[ \t]*~[ \t]?").unwrap();
    static ref LIST_LINE: Regex = Regex::new(r"(?m)^<li.*").unwrap();
    static ref LINK: Regex = Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*([^*]*?)\*\*").unwrap();
    static ref ITALIC_STAR: Regex = Regex::new(r"\*([^*]*?)\*").unwrap();
    static ref ITALIC_UNDERSCORE: Regex = Regex::new(r"_(.*?)_").unwrap();
    static ref CODE_FENCED: Regex = Regex::new(r"(?s)```.*?```").unwrap();
    static ref CODE_INLINE: Regex = Regex::new(r"`([^`]+)`").unwrap();
    static ref SUPERSCRIPT: Regex = Regex::new(r"\^([^\s]+)").unwrap();
    static ref IMAGE: Regex = Regex::new(r"%\((.*?)\)%").unwrap();
}

pub fn markdown_to_html(md: &str) -> String {
    // Headers (#)
    let out = HEADER_OPEN.replace_all(md, |caps: &Captures| {
        format!("<h{}>", caps[0].trim().len())
    });
    let out = HEADER_LINE.replace_all(&out, |caps: &Captures| {
        let line = &caps[0];
        format!("{line}</{}>", &line[1..3])
    });

    // Lists, closing every item at its end of line
    let out = LIST_MARKER.replace_all(&out, "<li>");
    let out = LIST_LINE.replace_all(&out, |caps: &Captures| format!("{}</li>", &caps[0]));

    // Links
    let out = LINK.replace_all(&out, "<a href=\"$2\">$1</a>");

    // Bold, italics
    let out = BOLD.replace_all(&out, "<b>$1</b>");
    let out = ITALIC_STAR.replace_all(&out, "<i>$1</i>");
    let out = ITALIC_UNDERSCORE.replace_all(&out, "<i>$1</i>");

    // Monospace; fenced blocks go first so inline backticks can't eat them
    let out = CODE_FENCED.replace_all(&out, |caps: &Captures| {
        let all = &caps[0];
        let first_cut = all.find('\n').unwrap_or(2);
        let body = &all[first_cut + 1..all.len() - 3];
        format!("<br><code>{}</code>", body.replace('\n', "<br>"))
    });
    let out = CODE_INLINE.replace_all(&out, "<code>$1</code>");

    // Superscript (x^this_is_sup)
    let out = SUPERSCRIPT.replace_all(&out, "<sup>$1</sup>");

    // Spacers (newlines, basically)
    let out = out.replace('\\', "\n<br>").replace("\n\n", "\n<br>");

    // Drop the newlines that would otherwise pad the generated tags
    let out = out.replace("\n<", "<").replace(">\n", ">");

    // Images
    IMAGE
        .replace_all(&out, "<img src=\"./$1\" style='width:100%'>")
        .into_owned()
}
