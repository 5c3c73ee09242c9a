use crate::io::{Format, error::Error};
use crate::model::types::{Anomer, RingType};
use std::io::BufRead;

/// One line of a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// 1-based line number in the source.
    pub line: usize,
    pub code: String,
    pub ring_type: Option<RingType>,
    pub anomer: Option<Anomer>,
}

impl Request {
    /// Ring type and anomer, filling gaps from the given defaults.
    pub fn resolve(&self, ring_type: RingType, anomer: Anomer) -> (RingType, Anomer) {
        (
            self.ring_type.unwrap_or(ring_type),
            self.anomer.unwrap_or(anomer),
        )
    }
}

/// Reads every request from a batch file.
pub fn read_requests<R: BufRead>(reader: R) -> Result<Vec<Request>, Error> {
    let mut requests = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let content = line.map_err(|e| Error::Io { source: e })?;
        if let Some(request) = parse_line(&content, i + 1)? {
            requests.push(request);
        }
    }
    Ok(requests)
}

fn parse_line(content: &str, line: usize) -> Result<Option<Request>, Error> {
    let body = match content.find('#') {
        Some(idx) => &content[..idx],
        None => content,
    };
    let mut tokens = body.split_whitespace();
    let Some(code) = tokens.next() else {
        return Ok(None);
    };

    let mut request = Request {
        line,
        code: code.to_string(),
        ring_type: None,
        anomer: None,
    };

    for token in tokens {
        if request.ring_type.is_none() {
            if let Ok(ring) = token.parse::<RingType>() {
                request.ring_type = Some(ring);
                continue;
            }
        }
        if request.anomer.is_none() {
            if let Ok(anomer) = token.parse::<Anomer>() {
                request.anomer = Some(anomer);
                continue;
            }
        }
        return Err(Error::parse(
            Format::Requests,
            line,
            format!("unexpected field '{}' after code '{}'", token, code),
        ));
    }

    Ok(Some(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_codes_with_optional_fields() {
        let input = "\
# reference sugars
ARLRDM pyranose alpha
MKLRDM  furanose beta   # fructose

AdRDM f
ALLRDM beta
ARRDM
";
        let requests = read_requests(Cursor::new(input)).unwrap();
        assert_eq!(requests.len(), 5);

        assert_eq!(requests[0].line, 2);
        assert_eq!(requests[0].code, "ARLRDM");
        assert_eq!(requests[0].ring_type, Some(RingType::Pyranose));
        assert_eq!(requests[0].anomer, Some(Anomer::Alpha));

        assert_eq!(requests[1].anomer, Some(Anomer::Beta));
        assert_eq!(requests[2].ring_type, Some(RingType::Furanose));
        assert_eq!(requests[2].anomer, None);
        assert_eq!(requests[3].ring_type, None);
        assert_eq!(requests[3].anomer, Some(Anomer::Beta));
        assert_eq!(requests[4].line, 7);
    }

    #[test]
    fn resolve_fills_defaults() {
        let request = Request {
            line: 1,
            code: "ARRDM".into(),
            ring_type: None,
            anomer: Some(Anomer::Beta),
        };
        assert_eq!(
            request.resolve(RingType::Pyranose, Anomer::Alpha),
            (RingType::Pyranose, Anomer::Beta)
        );
    }

    #[test]
    fn unknown_field_reports_line() {
        let err = read_requests(Cursor::new("ARLRDM\nARLRDM pyranose gamma\n")).unwrap_err();
        match err {
            Error::Parse { line, format, .. } => {
                assert_eq!(line, 2);
                assert_eq!(format, Format::Requests);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_ring_field_is_rejected() {
        assert!(read_requests(Cursor::new("ARLRDM pyranose furanose\n")).is_err());
    }

    #[test]
    fn empty_input_yields_no_requests() {
        assert!(read_requests(Cursor::new("\n  \n# nothing\n")).unwrap().is_empty());
    }
}
