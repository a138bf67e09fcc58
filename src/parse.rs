use bstr::{BStr, ByteSlice};

/// A borrowed line read from a stream.
#[derive(Clone, Copy, Debug)]
pub struct Line<'a> {
    /// The line number, 1-indexed.
    number: usize,
    /// The full line including its line terminator if present.
    full: &'a BStr,
}

impl<'a> Line<'a> {
    pub fn new(number: usize, full: &'a [u8]) -> Line<'a> {
        Line { number, full: full.as_bstr() }
    }

    /// Return the one-indexed line number of this line.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Return the line without its terminator (`\n` or `\r\n`).
    pub fn content(&self) -> &'a BStr {
        let mut content: &'a [u8] = self.full;
        if let Some(rest) = content.strip_suffix(b"\n") {
            content = rest.strip_suffix(b"\r").unwrap_or(rest);
        }
        content.as_bstr()
    }

    /// Return the line's content as UTF-8.
    ///
    /// Callers are expected to add the line number as context.
    pub fn to_str(&self) -> anyhow::Result<&'a str> {
        self.content().to_str().map_err(|err| {
            anyhow::anyhow!(
                "invalid UTF-8 at byte offset {}",
                err.valid_up_to()
            )
        })
    }
}

/// An extension trait for `std::io::BufRead` that iterates over lines as
/// byte strings.
///
/// This exists instead of using `BufRead::lines` so that invalid UTF-8 on
/// one line can be reported with its line number, and so that errors from
/// the closure can be `anyhow` errors.
pub trait BufReadExt: std::io::BufRead {
    /// Executes the given closure on each (`\n`|`\r\n`)-terminated line in the
    /// underlying reader.
    ///
    /// Iteration stops when the closure returns `false` or an error.
    fn for_byte_line<F>(&mut self, mut for_each_line: F) -> anyhow::Result<()>
    where
        Self: Sized,
        F: FnMut(Line<'_>) -> anyhow::Result<bool>,
    {
        let mut number = 0;
        let mut buf = vec![];
        loop {
            buf.clear();
            if self.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            number += 1;
            if !for_each_line(Line::new(number, &buf))? {
                return Ok(());
            }
        }
    }
}

impl<B: std::io::BufRead> BufReadExt for B {}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(mut data: &[u8]) -> Vec<(usize, String)> {
        let mut got = vec![];
        data.for_byte_line(|line| {
            got.push((line.number(), line.to_str()?.to_string()));
            Ok(true)
        })
        .unwrap();
        got
    }

    #[test]
    fn line_terminators() {
        assert_eq!(
            lines("วันนี้\r\n3 คืน\nพรุ่งนี้".as_bytes()),
            vec![
                (1, "วันนี้".to_string()),
                (2, "3 คืน".to_string()),
                (3, "พรุ่งนี้".to_string()),
            ],
        );
        assert_eq!(lines(b""), vec![]);
        assert_eq!(lines(b"\n"), vec![(1, "".to_string())]);
    }

    #[test]
    fn invalid_utf8() {
        let mut bad = None;
        b"ok\n3 \xFF\n"
            .as_slice()
            .for_byte_line(|line| {
                if let Err(err) = line.to_str() {
                    bad = Some((line.number(), err.to_string()));
                }
                Ok(true)
            })
            .unwrap();
        assert_eq!(
            bad,
            Some((2, "invalid UTF-8 at byte offset 2".to_string())),
        );
    }
}
