use crate::cli::Source;
use anyhow::Context;
use std::io::Read;

/// Read a template or argument document.
///
/// One trailing newline is dropped from file and stdin input so that a file
/// saved by an editor renders the same as the inline form.
pub fn read_source(source: &Source, what: &str) -> anyhow::Result<String> {
    let mut text = match source {
        Source::Inline(s) => return Ok(s.clone()),
        Source::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {what} file {}", path.display()))?,
        Source::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .with_context(|| format!("failed to read {what} from stdin"))?;
            buf
        }
    };

    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_is_returned_verbatim() {
        let src = Source::Inline("SELECT ?\n".into());
        assert_eq!(read_source(&src, "template").unwrap(), "SELECT ?\n");
    }

    #[test]
    fn missing_file_reports_path() {
        let src = Source::File("/nonexistent/sqltpl/query.sql".into());
        let err = read_source(&src, "template").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sqltpl/query.sql"));
        // The io error stays attached as the source.
        assert!(err.chain().any(|cause| cause.is::<std::io::Error>()));
    }
}
