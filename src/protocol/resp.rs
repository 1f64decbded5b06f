use atoi::FromRadix10SignedChecked;

/// RESP (REdis Serialization Protocol) data types
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  /// Simple strings, used for simple responses like "OK"
  SimpleString(String),
  /// Errors
  Error(String),
  /// Integers, also used as booleans (`:1` / `:0`)
  Integer(i64),
  /// Bulk strings, used for binary-safe strings (can be null)
  BulkString(Option<Vec<u8>>),
  /// Arrays of other values (can be null)
  Array(Option<Vec<Value>>),
}

impl Value {
  /// Create an error response
  pub fn error(msg: impl Into<String>) -> Self {
    Value::Error(msg.into())
  }

  /// `:1` for true, `:0` for false
  pub fn from_bool(b: bool) -> Self {
    Value::Integer(i64::from(b))
  }

  /// Null bulk string, the reply for a missing key
  pub fn null() -> Self {
    Value::BulkString(None)
  }

  /// Build a command frame: an array of bulk strings
  pub fn command<I, A>(args: I) -> Self
  where
    I: IntoIterator<Item = A>,
    A: AsRef<[u8]>,
  {
    Value::Array(Some(
      args
        .into_iter()
        .map(|arg| Value::BulkString(Some(arg.as_ref().to_vec())))
        .collect(),
    ))
  }

  /// Encode Value to RESP bytes
  pub fn encode(&self) -> Vec<u8> {
    let mut buf = Vec::new();
    self.encode_to(&mut buf);
    buf
  }

  fn encode_to(&self, buf: &mut Vec<u8>) {
    match self {
      Value::SimpleString(s) => {
        buf.push(b'+');
        buf.extend_from_slice(s.as_bytes());
        buf.extend_from_slice(b"\r\n");
      }
      Value::Error(e) => {
        buf.push(b'-');
        buf.extend_from_slice(e.as_bytes());
        buf.extend_from_slice(b"\r\n");
      }
      Value::Integer(i) => {
        buf.push(b':');
        buf.extend_from_slice(i.to_string().as_bytes());
        buf.extend_from_slice(b"\r\n");
      }
      Value::BulkString(None) => {
        buf.extend_from_slice(b"$-1\r\n");
      }
      Value::BulkString(Some(data)) => {
        buf.push(b'$');
        buf.extend_from_slice(data.len().to_string().as_bytes());
        buf.extend_from_slice(b"\r\n");
        buf.extend_from_slice(data);
        buf.extend_from_slice(b"\r\n");
      }
      Value::Array(None) => {
        buf.extend_from_slice(b"*-1\r\n");
      }
      Value::Array(Some(items)) => {
        buf.push(b'*');
        buf.extend_from_slice(items.len().to_string().as_bytes());
        buf.extend_from_slice(b"\r\n");
        for item in items {
          item.encode_to(buf);
        }
      }
    }
  }
}

#[cfg(test)]
impl Value {
  /// Items of an array frame, empty for anything else
  pub fn into_items(self) -> Vec<Value> {
    match self {
      Value::Array(Some(items)) => items,
      _ => Vec::new(),
    }
  }
}

/// Nesting limit for arrays
pub const MAX_DEPTH: usize = 32;

/// A frame that can never become valid, however many bytes follow
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
  #[error("unknown type byte 0x{0:02x}")]
  UnknownType(u8),
  #[error("invalid number")]
  InvalidNumber,
  #[error("invalid length {0}")]
  InvalidLength(i64),
  #[error("bulk string not terminated by CRLF")]
  MissingTerminator,
  #[error("arrays nested deeper than {}", MAX_DEPTH)]
  TooDeep,
}

/// `Ok(None)` while the frame is incomplete
pub type ParseResult<T> = Result<Option<T>, ParseError>;

/// Parser for RESP protocol
pub struct Parser;

impl Parser {
  /// Parse RESP data from buffer, return (Value, consumed_bytes) if a whole
  /// frame is available
  pub fn parse(buffer: &[u8]) -> ParseResult<(Value, usize)> {
    if buffer.is_empty() {
      return Ok(None);
    }

    let mut pos = 0;
    let result = Self::parse_value(buffer, &mut pos, 0)?;
    Ok(result.map(|value| (value, pos)))
  }

  fn parse_value(buffer: &[u8], pos: &mut usize, depth: usize) -> ParseResult<Value> {
    if *pos >= buffer.len() {
      return Ok(None);
    }

    let type_byte = buffer[*pos];
    *pos += 1;

    match type_byte {
      b'+' => Ok(Self::parse_simple_string(buffer, pos)),
      b'-' => Ok(Self::parse_error(buffer, pos)),
      b':' => Self::parse_integer(buffer, pos),
      b'$' => Self::parse_bulk_string(buffer, pos),
      b'*' => Self::parse_array(buffer, pos, depth),
      other => Err(ParseError::UnknownType(other)),
    }
  }

  fn parse_simple_string(buffer: &[u8], pos: &mut usize) -> Option<Value> {
    let line = Self::read_line(buffer, pos)?;
    Some(Value::SimpleString(
      String::from_utf8_lossy(line).to_string(),
    ))
  }

  fn parse_error(buffer: &[u8], pos: &mut usize) -> Option<Value> {
    let line = Self::read_line(buffer, pos)?;
    Some(Value::Error(String::from_utf8_lossy(line).to_string()))
  }

  fn parse_integer(buffer: &[u8], pos: &mut usize) -> ParseResult<Value> {
    let Some(line) = Self::read_line(buffer, pos) else {
      return Ok(None);
    };
    Ok(Some(Value::Integer(Self::parse_number(line)?)))
  }

  fn parse_bulk_string(buffer: &[u8], pos: &mut usize) -> ParseResult<Value> {
    let Some(line) = Self::read_line(buffer, pos) else {
      return Ok(None);
    };
    let len = Self::parse_number(line)?;

    if len == -1 {
      return Ok(Some(Value::BulkString(None)));
    }

    if len < 0 {
      return Err(ParseError::InvalidLength(len));
    }

    let len = len as usize;

    // Check if we have enough data (len + \r\n)
    if *pos + len + 2 > buffer.len() {
      return Ok(None);
    }

    if buffer[*pos + len..*pos + len + 2] != *b"\r\n" {
      return Err(ParseError::MissingTerminator);
    }

    let data = buffer[*pos..*pos + len].to_vec();
    *pos += len + 2;

    Ok(Some(Value::BulkString(Some(data))))
  }

  fn parse_array(buffer: &[u8], pos: &mut usize, depth: usize) -> ParseResult<Value> {
    if depth >= MAX_DEPTH {
      return Err(ParseError::TooDeep);
    }

    let Some(line) = Self::read_line(buffer, pos) else {
      return Ok(None);
    };
    let count = Self::parse_number(line)?;

    if count == -1 {
      return Ok(Some(Value::Array(None)));
    }

    if count < 0 {
      return Err(ParseError::InvalidLength(count));
    }

    let count = count as usize;
    let mut items = Vec::with_capacity(count.min(64));

    for _ in 0..count {
      match Self::parse_value(buffer, pos, depth + 1)? {
        Some(item) => items.push(item),
        None => return Ok(None),
      }
    }

    Ok(Some(Value::Array(Some(items))))
  }

  /// The whole line must be a decimal integer
  fn parse_number(line: &[u8]) -> Result<i64, ParseError> {
    match i64::from_radix_10_signed_checked(line) {
      (Some(n), used) if used == line.len() && used > 0 => Ok(n),
      _ => Err(ParseError::InvalidNumber),
    }
  }

  fn read_line<'a>(buffer: &'a [u8], pos: &mut usize) -> Option<&'a [u8]> {
    let start = *pos;

    // Find \r\n
    for i in start..buffer.len().saturating_sub(1) {
      if buffer[i] == b'\r' && buffer[i + 1] == b'\n' {
        *pos = i + 2;
        return Some(&buffer[start..i]);
      }
    }

    None
  }
}
