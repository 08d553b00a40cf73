//! Minimal STOMP 1.2 framing over WebSocket text messages
//!
//! Only what a pure subscriber needs: CONNECT, SUBSCRIBE and DISCONNECT go
//! out; CONNECTED, MESSAGE, RECEIPT and ERROR come back. Heart-beat EOLs are
//! skipped.

use std::fmt::Write as _;
use tracing::trace;

use super::error::StompError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Connect,
    Stomp,
    Subscribe,
    Unsubscribe,
    Disconnect,
    Connected,
    Message,
    Receipt,
    Error,
}

impl Command {
    pub fn as_str(self) -> &'static str {
        match self {
            Command::Connect => "CONNECT",
            Command::Stomp => "STOMP",
            Command::Subscribe => "SUBSCRIBE",
            Command::Unsubscribe => "UNSUBSCRIBE",
            Command::Disconnect => "DISCONNECT",
            Command::Connected => "CONNECTED",
            Command::Message => "MESSAGE",
            Command::Receipt => "RECEIPT",
            Command::Error => "ERROR",
        }
    }

    fn parse(s: &str) -> Result<Self, StompError> {
        Ok(match s {
            "CONNECT" => Command::Connect,
            "STOMP" => Command::Stomp,
            "SUBSCRIBE" => Command::Subscribe,
            "UNSUBSCRIBE" => Command::Unsubscribe,
            "DISCONNECT" => Command::Disconnect,
            "CONNECTED" => Command::Connected,
            "MESSAGE" => Command::Message,
            "RECEIPT" => Command::Receipt,
            "ERROR" => Command::Error,
            other => return Err(StompError::UnknownCommand(other.to_string())),
        })
    }

    /// CONNECT/CONNECTED headers are never escaped
    fn escapes_headers(self) -> bool {
        !matches!(self, Command::Connect | Command::Stomp | Command::Connected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: Command,
    /// In wire order; on repeated keys the first one wins
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Frame {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// CONNECT for a virtual host, heart-beats disabled
    pub fn connect(host: &str) -> Self {
        Frame::new(Command::Connect)
            .header("accept-version", "1.2,1.1,1.0")
            .header("host", host)
            .header("heart-beat", "0,0")
    }

    pub fn subscribe(id: &str, destination: &str) -> Self {
        Frame::new(Command::Subscribe)
            .header("id", id)
            .header("destination", destination)
            .header("ack", "auto")
    }

    pub fn disconnect(receipt: &str) -> Self {
        Frame::new(Command::Disconnect).header("receipt", receipt)
    }

    /// Serialize to the wire form, NUL terminated
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(64 + self.body.len());
        out.push_str(self.command.as_str());
        out.push('\n');
        let escape = self.command.escapes_headers();
        for (k, v) in &self.headers {
            if escape {
                let _ = writeln!(out, "{}:{}", escape_header(k), escape_header(v));
            } else {
                let _ = writeln!(out, "{k}:{v}");
            }
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }
}

fn escape_header(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ':' => out.push_str("\\c"),
            c => out.push(c),
        }
    }
    out
}

fn unescape_header(s: &str) -> Result<String, StompError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('c') => out.push(':'),
            _ => return Err(StompError::InvalidEscape(s.to_string())),
        }
    }
    Ok(out)
}

/// Decode every frame in one WebSocket text message.
///
/// Leading EOLs (heart-beats) are skipped, so a bare `"\n"` yields no frames.
pub fn decode_frames(text: &str) -> Result<Vec<Frame>, StompError> {
    let mut frames = Vec::new();
    let mut rest = text;
    loop {
        rest = rest.trim_start_matches(['\r', '\n']);
        if rest.is_empty() {
            break;
        }
        let (frame, consumed) = decode_one(rest)?;
        trace!(command = frame.command.as_str(), consumed, "Decoded STOMP frame");
        frames.push(frame);
        rest = &rest[consumed..];
    }
    Ok(frames)
}

fn decode_one(text: &str) -> Result<(Frame, usize), StompError> {
    let head_end = text.find("\n\n").map(|i| (i, i + 2));
    let head_end_crlf = text.find("\r\n\r\n").map(|i| (i, i + 4));
    let (head_len, body_start) = match (head_end, head_end_crlf) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => return Err(StompError::Unterminated),
    };

    let mut lines = text[..head_len].split('\n').map(|l| l.trim_end_matches('\r'));
    let command_line = lines.next().filter(|l| !l.is_empty()).ok_or(StompError::MissingCommand)?;
    let command = Command::parse(command_line)?;
    let escape = command.escapes_headers();

    let mut headers = Vec::new();
    for line in lines {
        let (k, v) = line
            .split_once(':')
            .ok_or_else(|| StompError::MalformedHeader(line.to_string()))?;
        if escape {
            headers.push((unescape_header(k)?, unescape_header(v)?));
        } else {
            headers.push((k.to_string(), v.to_string()));
        }
    }
    let frame_headers = Frame { command, headers, body: String::new() };

    let body_text = &text[body_start..];
    let body_len = match frame_headers.get("content-length").and_then(|l| l.parse::<usize>().ok()) {
        Some(len) if body_text.len() > len && body_text.is_char_boundary(len) => len,
        Some(_) => return Err(StompError::Unterminated),
        None => body_text.find('\0').ok_or(StompError::Unterminated)?,
    };
    if body_text.as_bytes().get(body_len) != Some(&0) {
        return Err(StompError::Unterminated);
    }

    let frame = Frame {
        body: body_text[..body_len].to_string(),
        ..frame_headers
    };
    Ok((frame, body_start + body_len + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_connect() {
        let wire = Frame::connect("localhost").encode();
        assert_eq!(
            wire,
            "CONNECT\naccept-version:1.2,1.1,1.0\nhost:localhost\nheart-beat:0,0\n\n\0"
        );
    }

    #[test]
    fn test_encode_subscribe_escapes() {
        let wire = Frame::new(Command::Subscribe).header("x", "a:b\nc").encode();
        assert_eq!(wire, "SUBSCRIBE\nx:a\\cb\\nc\n\n\0");
    }

    #[test]
    fn test_decode_message() {
        let wire = "MESSAGE\ndestination:/topic/weather-notifications\ncontent-type:application/json\nsubscription:sub-0\nmessage-id:abc-1\ncontent-length:15\n\n{\"city\":\"Cork\"}\0";
        let frames = decode_frames(wire).unwrap();
        assert_eq!(frames.len(), 1);
        let f = &frames[0];
        assert_eq!(f.command, Command::Message);
        assert_eq!(f.get("subscription"), Some("sub-0"));
        assert_eq!(f.body, r#"{"city":"Cork"}"#);
    }

    #[test]
    fn test_decode_content_length_allows_nul_in_body() {
        let wire = "MESSAGE\ncontent-length:3\n\na\0b\0";
        let frames = decode_frames(wire).unwrap();
        assert_eq!(frames[0].body, "a\0b");
    }

    #[test]
    fn test_decode_heartbeats_and_multiple_frames() {
        assert!(decode_frames("\n").unwrap().is_empty());
        let wire = "\nCONNECTED\nversion:1.2\n\n\0\r\nRECEIPT\nreceipt-id:r-1\n\n\0\n";
        let frames = decode_frames(wire).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].get("version"), Some("1.2"));
        assert_eq!(frames[1].command, Command::Receipt);
    }

    #[test]
    fn test_decode_crlf_and_unescape() {
        let wire = "ERROR\r\nmessage:bad\\cthing\r\n\r\ndetails\0";
        let frame = &decode_frames(wire).unwrap()[0];
        assert_eq!(frame.get("message"), Some("bad:thing"));
        assert_eq!(frame.body, "details");
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode_frames("BOGUS\n\n\0"), Err(StompError::UnknownCommand("BOGUS".into())));
        assert_eq!(decode_frames("MESSAGE\nnocolon\n\n\0"), Err(StompError::MalformedHeader("nocolon".into())));
        assert_eq!(decode_frames("MESSAGE\n\nbody"), Err(StompError::Unterminated));
        assert!(matches!(decode_frames("MESSAGE\nx:\\q\n\n\0"), Err(StompError::InvalidEscape(_))));
    }

    #[test]
    fn test_first_repeated_header_wins() {
        let frame = &decode_frames("MESSAGE\nfoo:1\nfoo:2\n\n\0").unwrap()[0];
        assert_eq!(frame.get("foo"), Some("1"));
    }
}
