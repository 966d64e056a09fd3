use crate::prelude::{HeaderMode, TrajectoryError, TrajectoryResult};
use std::io::BufRead;
use std::path::Path;

/// Number of header lines preceding the first data line of a PLT file.
pub const HEADER_LINES: usize = 6;

const FORMAT_TAG: &str = "Geolife trajectory";
const DATUM_TAG: &str = "WGS 84";
const ALTITUDE_TAG: &str = "Altitude is in Feet";
const RESERVED_TAG: &str = "Reserved 3";
const TRACK_FIELDS: usize = 8;
const SEPARATOR: &str = "0";

fn expected_line(line_number: usize) -> &'static str {
    match line_number {
        1 => FORMAT_TAG,
        2 => DATUM_TAG,
        3 => ALTITUDE_TAG,
        4 => RESERVED_TAG,
        5 => "0,2,255,My Track,0,0,2,8421376",
        _ => SEPARATOR,
    }
}

fn line_conforms(line_number: usize, line: &str) -> bool {
    match line_number {
        5 => line.split(',').count() == TRACK_FIELDS,
        n => line == expected_line(n),
    }
}

/// Consumes the header of a freshly opened PLT source.
///
/// Returns the number of lines consumed. In lenient mode a short file is
/// consumed to its end without complaint.
pub fn skip_header<R: BufRead>(
    reader: &mut R,
    mode: HeaderMode,
    path: &Path,
) -> TrajectoryResult<usize> {
    let mut buffer = String::new();
    for line_number in 1..=HEADER_LINES {
        buffer.clear();
        let read = reader
            .read_line(&mut buffer)
            .map_err(|source| TrajectoryError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        if read == 0 {
            return match mode {
                HeaderMode::Lenient => Ok(line_number - 1),
                HeaderMode::Strict => Err(TrajectoryError::MalformedHeader {
                    file: path.display().to_string(),
                    line_number,
                    expected: expected_line(line_number).to_string(),
                    found: None,
                }),
            };
        }

        let line = buffer.trim_end();
        if mode == HeaderMode::Strict && !line_conforms(line_number, line) {
            return Err(TrajectoryError::MalformedHeader {
                file: path.display().to_string(),
                line_number,
                expected: expected_line(line_number).to_string(),
                found: Some(line.to_string()),
            });
        }
    }
    Ok(HEADER_LINES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::HEADER;
    use std::io::Cursor;

    fn path() -> &'static Path {
        Path::new("20081023025304.plt")
    }

    #[test]
    fn canonical_header_passes_strict_mode() {
        let mut reader = Cursor::new(format!("{}1,2,0,3,4,2008-10-23,00:00:00\n", HEADER));
        assert_eq!(skip_header(&mut reader, HeaderMode::Strict, path()).unwrap(), 6);

        let mut rest = String::new();
        reader.read_line(&mut rest).unwrap();
        assert!(rest.starts_with("1,2,0"));
    }

    #[test]
    fn crlf_header_passes_strict_mode() {
        let mut reader = Cursor::new(HEADER.replace('\n', "\r\n"));
        assert_eq!(skip_header(&mut reader, HeaderMode::Strict, path()).unwrap(), 6);
    }

    #[test]
    fn lenient_mode_ignores_content() {
        let mut reader = Cursor::new("a\nb\nc\nd\ne\nf\ndata\n");
        assert_eq!(skip_header(&mut reader, HeaderMode::Lenient, path()).unwrap(), 6);
    }

    #[test]
    fn lenient_mode_accepts_short_file() {
        let mut reader = Cursor::new("Geolife trajectory\nWGS 84\n");
        assert_eq!(skip_header(&mut reader, HeaderMode::Lenient, path()).unwrap(), 2);
    }

    #[test]
    fn strict_mode_reports_deviating_line() {
        let header = HEADER.replace("WGS 84", "NAD 27");
        let err = skip_header(&mut Cursor::new(header), HeaderMode::Strict, path()).unwrap_err();
        match err {
            TrajectoryError::MalformedHeader {
                line_number, found, ..
            } => {
                assert_eq!(line_number, 2);
                assert_eq!(found.as_deref(), Some("NAD 27"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn strict_mode_reports_short_file() {
        let err = skip_header(
            &mut Cursor::new("Geolife trajectory\n"),
            HeaderMode::Strict,
            path(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TrajectoryError::MalformedHeader {
                line_number: 2,
                found: None,
                ..
            }
        ));
    }
}
