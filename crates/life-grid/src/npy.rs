//! NPY array-file header codec.
//!
//! An NPY file starts with the magic string `\x93NUMPY`, two version bytes,
//! a little-endian header length (2 bytes for version 1.x, 4 bytes for 2.x
//! and 3.x), and a Python-literal dictionary such as
//!
//! ```text
//! {'descr': '<u1', 'fortran_order': False, 'shape': (m, n), }
//! ```
//!
//! padded with spaces and terminated by a newline. The raw array bytes follow
//! immediately after.
//!
//! Only unsigned single-byte, C-contiguous arrays of rank 1 or 2 are
//! accepted. Headers are always written as version 1.0 in a fixed 128-byte
//! block.

use crate::error::GridError;

/// The six-byte magic string that opens every NPY file.
pub const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Size of the header block written by [`encode_header`].
pub const HEADER_LEN: usize = 128;

/// Bytes before the dictionary in a version 1.x header.
const V1_PREAMBLE: usize = 10;

/// Bytes before the dictionary in a version 2.x/3.x header.
const V2_PREAMBLE: usize = 12;

/// Element type written by [`encode_header`].
const DESCR_U1: &str = "<u1";

/// Parsed header: array shape and where the data begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Number of rows (`m`).
    pub rows: usize,
    /// Number of columns (`n`).
    pub cols: usize,
    /// Byte offset of the first array element.
    pub data_offset: usize,
}

/// Parse the header at the start of `bytes`.
///
/// A rank-1 array of shape `(k,)` is read as `k` rows of width 1.
///
/// # Errors
///
/// Returns [`GridError::BadMagic`], [`GridError::UnsupportedVersion`],
/// [`GridError::MalformedHeader`], [`GridError::UnsupportedDtype`],
/// [`GridError::FortranOrder`], or [`GridError::UnsupportedRank`].
pub fn parse_header(bytes: &[u8]) -> Result<Header, GridError> {
    if bytes.get(..MAGIC.len()) != Some(MAGIC.as_slice()) {
        return Err(GridError::BadMagic);
    }
    let (major, minor) = match (bytes.get(6), bytes.get(7)) {
        (Some(&major), Some(&minor)) => (major, minor),
        _ => return Err(malformed("file ends inside the version field")),
    };

    let (preamble, dict_len) = match major {
        1 => {
            let raw = read_le::<2>(bytes, 8)?;
            (V1_PREAMBLE, usize::from(u16::from_le_bytes(raw)))
        }
        2 | 3 => {
            let raw = read_le::<4>(bytes, 8)?;
            let len = usize::try_from(u32::from_le_bytes(raw))
                .map_err(|_err| malformed("header length exceeds the address space"))?;
            (V2_PREAMBLE, len)
        }
        _ => return Err(GridError::UnsupportedVersion { major, minor }),
    };

    let data_offset = preamble
        .checked_add(dict_len)
        .ok_or_else(|| malformed("header length overflows"))?;
    let dict_bytes = bytes
        .get(preamble..data_offset)
        .ok_or_else(|| malformed("file ends inside the header dictionary"))?;
    let dict = std::str::from_utf8(dict_bytes)
        .map_err(|_err| malformed("header dictionary is not valid text"))?;

    let fields = DictParser::new(dict).parse()?;

    let descr = fields.descr.ok_or_else(|| malformed("missing 'descr' key"))?;
    if !is_unsigned_byte(&descr) {
        return Err(GridError::UnsupportedDtype { descr });
    }
    match fields.fortran_order {
        Some(false) => {}
        Some(true) => return Err(GridError::FortranOrder),
        None => return Err(malformed("missing 'fortran_order' key")),
    }
    let shape = fields.shape.ok_or_else(|| malformed("missing 'shape' key"))?;
    let (rows, cols) = match shape.as_slice() {
        [k] => (*k, 1),
        [m, n] => (*m, *n),
        other => return Err(GridError::UnsupportedRank { rank: other.len() }),
    };

    Ok(Header {
        rows,
        cols,
        data_offset,
    })
}

/// Render the fixed 128-byte version 1.0 header for an `rows x cols` `<u1`
/// array.
///
/// # Errors
///
/// Returns [`GridError::HeaderOverflow`] if the dictionary does not fit.
pub fn encode_header(rows: usize, cols: usize) -> Result<[u8; HEADER_LEN], GridError> {
    let dict = format!(
        "{{'descr': '{DESCR_U1}', 'fortran_order': False, 'shape': ({rows}, {cols}), }}"
    );
    // Dictionary, padding, and the trailing newline share this space.
    let capacity = HEADER_LEN.saturating_sub(V1_PREAMBLE).saturating_sub(1);
    if dict.len() > capacity {
        return Err(GridError::HeaderOverflow {
            len: dict.len(),
            capacity,
        });
    }

    let mut header = [b' '; HEADER_LEN];
    let dict_len = u16::try_from(HEADER_LEN.saturating_sub(V1_PREAMBLE)).map_err(|_err| {
        GridError::HeaderOverflow {
            len: dict.len(),
            capacity,
        }
    })?;
    let preamble = MAGIC
        .iter()
        .copied()
        .chain([1, 0])
        .chain(dict_len.to_le_bytes())
        .chain(dict.bytes());
    for (slot, byte) in header.iter_mut().zip(preamble) {
        *slot = byte;
    }
    if let Some(last) = header.last_mut() {
        *last = b'\n';
    }
    Ok(header)
}

/// Accepted spellings of the unsigned single-byte element type.
fn is_unsigned_byte(descr: &str) -> bool {
    matches!(descr, "|u1" | "<u1" | ">u1" | "=u1" | "u1" | "uint8" | "B" | "|B")
}

fn read_le<const N: usize>(bytes: &[u8], at: usize) -> Result<[u8; N], GridError> {
    at.checked_add(N)
        .and_then(|end| bytes.get(at..end))
        .and_then(|slice| <[u8; N]>::try_from(slice).ok())
        .ok_or_else(|| malformed("file ends inside the header length field"))
}

fn malformed(reason: &str) -> GridError {
    GridError::MalformedHeader {
        reason: reason.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Dictionary parser
// ---------------------------------------------------------------------------

/// Fields extracted from the header dictionary. Unknown keys are ignored.
#[derive(Debug, Default)]
struct HeaderFields {
    descr: Option<String>,
    fortran_order: Option<bool>,
    shape: Option<Vec<usize>>,
}

/// A value in the header dictionary.
enum Literal {
    Str(String),
    Bool(bool),
    Tuple(Vec<usize>),
}

/// Cursor over the Python-literal subset used by NPY headers.
struct DictParser<'a> {
    text: &'a [u8],
    pos: usize,
}

impl<'a> DictParser<'a> {
    const fn new(text: &'a str) -> Self {
        Self {
            text: text.as_bytes(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<HeaderFields, GridError> {
        let mut fields = HeaderFields::default();
        self.skip_ws();
        self.expect(b'{')?;
        loop {
            self.skip_ws();
            if self.eat(b'}') {
                break;
            }
            let key = self.string()?;
            self.skip_ws();
            self.expect(b':')?;
            self.skip_ws();
            let value = self.literal()?;
            match (key.as_str(), value) {
                ("descr", Literal::Str(s)) => fields.descr = Some(s),
                ("fortran_order", Literal::Bool(b)) => fields.fortran_order = Some(b),
                ("shape", Literal::Tuple(t)) => fields.shape = Some(t),
                ("descr" | "fortran_order" | "shape", _) => {
                    return Err(malformed(&format!("wrong value type for '{key}'")));
                }
                _ => {}
            }
            self.skip_ws();
            if self.eat(b'}') {
                break;
            }
            self.expect(b',')?;
        }
        Ok(fields)
    }

    fn literal(&mut self) -> Result<Literal, GridError> {
        match self.peek() {
            Some(b'\'' | b'"') => self.string().map(Literal::Str),
            Some(b'(') => self.tuple().map(Literal::Tuple),
            Some(b'T') => self.keyword("True").map(|()| Literal::Bool(true)),
            Some(b'F') => self.keyword("False").map(|()| Literal::Bool(false)),
            _ => Err(malformed("unexpected value in header dictionary")),
        }
    }

    fn string(&mut self) -> Result<String, GridError> {
        let quote = match self.peek() {
            Some(q @ (b'\'' | b'"')) => q,
            _ => return Err(malformed("expected a quoted string")),
        };
        self.advance();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == quote {
                let raw = self
                    .text
                    .get(start..self.pos)
                    .ok_or_else(|| malformed("string out of range"))?;
                self.advance();
                return String::from_utf8(raw.to_vec())
                    .map_err(|_err| malformed("string is not valid text"));
            }
            self.advance();
        }
        Err(malformed("unterminated string"))
    }

    fn tuple(&mut self) -> Result<Vec<usize>, GridError> {
        self.expect(b'(')?;
        let mut dims = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(b')') {
                return Ok(dims);
            }
            dims.push(self.integer()?);
            self.skip_ws();
            if self.eat(b')') {
                return Ok(dims);
            }
            self.expect(b',')?;
        }
    }

    fn integer(&mut self) -> Result<usize, GridError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        // Python 2 era writers emit long literals such as `3L`.
        let digits = self
            .text
            .get(start..self.pos)
            .and_then(|d| std::str::from_utf8(d).ok())
            .filter(|d| !d.is_empty())
            .ok_or_else(|| malformed("expected a shape dimension"))?;
        let value = digits
            .parse::<usize>()
            .map_err(|_err| malformed("shape dimension out of range"))?;
        self.eat(b'L');
        Ok(value)
    }

    fn keyword(&mut self, word: &str) -> Result<(), GridError> {
        let end = self
            .pos
            .checked_add(word.len())
            .ok_or_else(|| malformed("keyword out of range"))?;
        if self.text.get(self.pos..end) == Some(word.as_bytes()) {
            self.pos = end;
            Ok(())
        } else {
            Err(malformed("unexpected bare word in header dictionary"))
        }
    }

    fn expect(&mut self, c: u8) -> Result<(), GridError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(malformed(&format!("expected '{}'", char::from(c))))
        }
    }

    fn eat(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.advance();
        }
    }

    fn peek(&self) -> Option<u8> {
        self.text.get(self.pos).copied()
    }

    const fn advance(&mut self) {
        self.pos = self.pos.saturating_add(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn v1_file(dict: &str) -> Vec<u8> {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&[1, 0]);
        let len = u16::try_from(dict.len()).unwrap();
        bytes.extend_from_slice(&len.to_le_bytes());
        bytes.extend_from_slice(dict.as_bytes());
        bytes
    }

    #[test]
    fn encoded_header_layout() {
        let header = encode_header(3, 4).unwrap();
        assert_eq!(&header[..6], MAGIC);
        assert_eq!(header[6], 1);
        assert_eq!(header[7], 0);
        assert_eq!(u16::from_le_bytes([header[8], header[9]]), 118);
        assert_eq!(header[127], b'\n');
        let text = std::str::from_utf8(&header[10..]).unwrap();
        assert!(text.starts_with("{'descr': '<u1', 'fortran_order': False, 'shape': (3, 4), }"));
        assert!(text.trim_end_matches('\n').ends_with(' '));
    }

    #[test]
    fn encoded_header_parses_back() {
        let header = encode_header(10, 20).unwrap();
        let parsed = parse_header(&header).unwrap();
        assert_eq!(
            parsed,
            Header {
                rows: 10,
                cols: 20,
                data_offset: 128,
            }
        );
    }

    #[test]
    fn numpy_style_header_is_accepted() {
        let file = v1_file("{'descr': '|u1', 'fortran_order': False, 'shape': (5, 6), }      \n");
        let header = parse_header(&file).unwrap();
        assert_eq!((header.rows, header.cols), (5, 6));
        assert_eq!(header.data_offset, file.len());
    }

    #[test]
    fn rank_one_is_a_column() {
        let file = v1_file("{'descr': '<u1', 'fortran_order': False, 'shape': (7,), }\n");
        let header = parse_header(&file).unwrap();
        assert_eq!((header.rows, header.cols), (7, 1));
    }

    #[test]
    fn version_two_uses_four_byte_length() {
        let dict = "{'descr': '<u1', 'fortran_order': False, 'shape': (2, 2), }\n";
        let mut file = MAGIC.to_vec();
        file.extend_from_slice(&[2, 0]);
        file.extend_from_slice(&u32::try_from(dict.len()).unwrap().to_le_bytes());
        file.extend_from_slice(dict.as_bytes());
        let header = parse_header(&file).unwrap();
        assert_eq!(header.data_offset, 12 + dict.len());
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut file = v1_file("{}");
        file[1] = b'X';
        assert!(matches!(parse_header(&file), Err(GridError::BadMagic)));
        assert!(matches!(parse_header(b""), Err(GridError::BadMagic)));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut file = v1_file("{}");
        file[6] = 9;
        assert!(matches!(
            parse_header(&file),
            Err(GridError::UnsupportedVersion { major: 9, .. })
        ));
    }

    #[test]
    fn wide_dtype_is_rejected() {
        let file = v1_file("{'descr': '<f8', 'fortran_order': False, 'shape': (2, 2), }");
        assert!(matches!(
            parse_header(&file),
            Err(GridError::UnsupportedDtype { descr }) if descr == "<f8"
        ));
    }

    #[test]
    fn fortran_order_is_rejected() {
        let file = v1_file("{'descr': '<u1', 'fortran_order': True, 'shape': (2, 2), }");
        assert!(matches!(parse_header(&file), Err(GridError::FortranOrder)));
    }

    #[test]
    fn scalar_and_cube_are_rejected() {
        let scalar = v1_file("{'descr': '<u1', 'fortran_order': False, 'shape': (), }");
        assert!(matches!(
            parse_header(&scalar),
            Err(GridError::UnsupportedRank { rank: 0 })
        ));
        let cube = v1_file("{'descr': '<u1', 'fortran_order': False, 'shape': (2, 2, 2), }");
        assert!(matches!(
            parse_header(&cube),
            Err(GridError::UnsupportedRank { rank: 3 })
        ));
    }

    #[test]
    fn truncated_dictionary_is_malformed() {
        let mut file = v1_file("{'descr': '<u1', 'fortran_order': False, 'shape': (2, 2), }");
        file.truncate(20);
        assert!(matches!(
            parse_header(&file),
            Err(GridError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn missing_shape_is_malformed() {
        let file = v1_file("{'descr': '<u1', 'fortran_order': False}");
        assert!(matches!(
            parse_header(&file),
            Err(GridError::MalformedHeader { .. })
        ));
    }
}
