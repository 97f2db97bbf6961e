//! Stage 2: the pushdown automaton that turns a structural-index stream
//! into a tape (`spec.md` §4.2).
//!
//! The six states `spec.md` names are refined into the concrete "or-close"
//! variant an array needs symmetrically with an object's
//! `EXPECT_KEY_OR_CLOSE` (`ExpectValueOrCloseArray` for the position right
//! after `[`), completing the digest rather than changing its behavior.

use jtape_core::{ParseError, Result};

use crate::config::ParserConfig;
use crate::stringbuf::StringBuffer;
use crate::tape::{self, Tape};
use crate::unescape::consume_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectValue,
    ExpectValueOrCloseArray,
    ExpectKeyOrClose,
    ExpectKey,
    ExpectColon,
    ExpectCommaOrCloseObj,
    ExpectCommaOrCloseArr,
    /// The single root value is complete; any further structural offset is
    /// trailing garbage.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Root,
    Object,
    Array,
}

struct Frame {
    kind: ContainerKind,
    open_index: usize,
}

/// Consume the entire structural-index stream `offsets` (offsets into
/// `input`) and append exactly one document -- a ROOT open, its value
/// subtree, and a matching ROOT close -- to `tape`/`strings`.
///
/// # Errors
///
/// Any lexical or grammatical violation described in `spec.md` §7, or
/// [`ParseError::DepthExceeded`] if nesting exceeds `config.max_depth`.
pub fn build(
    input: &[u8],
    offsets: &[u32],
    config: &ParserConfig,
    tape: &mut Tape,
    strings: &mut StringBuffer,
) -> Result<()> {
    if offsets.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let root_open = tape.push(tape::TAG_ROOT, 0);
    let mut stack = vec![Frame {
        kind: ContainerKind::Root,
        open_index: root_open,
    }];
    let mut state = State::ExpectValue;
    let mut i = 0usize;

    while i < offsets.len() {
        let offset = offsets[i] as usize;
        let byte = input[offset];

        match state {
            State::ExpectValue | State::ExpectValueOrCloseArray => {
                if byte == b']' && state == State::ExpectValueOrCloseArray {
                    close_container(&mut stack, tape, offset, ContainerKind::Array)?;
                    state = after_value_state(&stack);
                    i += 1;
                    continue;
                }
                let (next_i, next_state) =
                    parse_value(input, offsets, i, config, tape, strings, &mut stack)?;
                i = next_i;
                state = next_state;
            }
            State::ExpectKeyOrClose => {
                if byte == b'}' {
                    close_container(&mut stack, tape, offset, ContainerKind::Object)?;
                    state = after_value_state(&stack);
                    i += 1;
                    continue;
                }
                parse_key(input, offset, tape, strings)?;
                state = State::ExpectColon;
                i += 1;
            }
            State::ExpectKey => {
                parse_key(input, offset, tape, strings)?;
                state = State::ExpectColon;
                i += 1;
            }
            State::ExpectColon => {
                if byte != b':' {
                    return Err(ParseError::UnexpectedByte { offset, byte });
                }
                state = State::ExpectValue;
                i += 1;
            }
            State::ExpectCommaOrCloseObj => {
                if byte == b'}' {
                    close_container(&mut stack, tape, offset, ContainerKind::Object)?;
                    state = after_value_state(&stack);
                } else if byte == b',' {
                    state = State::ExpectKey;
                } else {
                    return Err(ParseError::UnexpectedByte { offset, byte });
                }
                i += 1;
            }
            State::ExpectCommaOrCloseArr => {
                if byte == b']' {
                    close_container(&mut stack, tape, offset, ContainerKind::Array)?;
                    state = after_value_state(&stack);
                } else if byte == b',' {
                    state = State::ExpectValue;
                } else {
                    return Err(ParseError::UnexpectedByte { offset, byte });
                }
                i += 1;
            }
            State::Done => {
                return Err(ParseError::TrailingGarbage { offset });
            }
        }
    }

    if stack.len() != 1 || stack[0].kind != ContainerKind::Root {
        return Err(ParseError::TruncatedDocument { offset: input.len() });
    }

    let root_close = tape.push(tape::TAG_ROOT, root_open as u64);
    tape.set_payload(root_open, root_close as u64);
    Ok(())
}

/// Determine the state to resume in given the (possibly just-popped)
/// current top-of-stack container.
fn after_value_state(stack: &[Frame]) -> State {
    match stack.last().map(|f| f.kind) {
        Some(ContainerKind::Object) => State::ExpectCommaOrCloseObj,
        Some(ContainerKind::Array) => State::ExpectCommaOrCloseArr,
        _ => State::Done,
    }
}

/// Parse one value at `offsets[i]`, returning the next `offsets` index and
/// the state to resume in afterward.
#[allow(clippy::too_many_arguments)]
fn parse_value(
    input: &[u8],
    offsets: &[u32],
    i: usize,
    config: &ParserConfig,
    tape: &mut Tape,
    strings: &mut StringBuffer,
    stack: &mut Vec<Frame>,
) -> Result<(usize, State)> {
    let offset = offsets[i] as usize;
    let byte = input[offset];

    match byte {
        b'{' => {
            let open = tape.push(tape::TAG_OBJECT_OPEN, 0);
            stack.push(Frame {
                kind: ContainerKind::Object,
                open_index: open,
            });
            check_depth(stack, offset, config)?;
            Ok((i + 1, State::ExpectKeyOrClose))
        }
        b'[' => {
            let open = tape.push(tape::TAG_ARRAY_OPEN, 0);
            stack.push(Frame {
                kind: ContainerKind::Array,
                open_index: open,
            });
            check_depth(stack, offset, config)?;
            Ok((i + 1, State::ExpectValueOrCloseArray))
        }
        b'"' => {
            let (location, _end) =
                consume_string(input, offset, false, config.copy_strings, strings)?;
            tape.push(tape::TAG_STRING, tape::encode_string_payload(location));
            Ok((i + 1, after_value_state(stack)))
        }
        b't' => {
            expect_literal(input, offset, b"true")?;
            tape.push(tape::TAG_TRUE, 0);
            Ok((i + 1, after_value_state(stack)))
        }
        b'f' => {
            expect_literal(input, offset, b"false")?;
            tape.push(tape::TAG_FALSE, 0);
            Ok((i + 1, after_value_state(stack)))
        }
        b'n' => {
            expect_literal(input, offset, b"null")?;
            tape.push(tape::TAG_NULL, 0);
            Ok((i + 1, after_value_state(stack)))
        }
        b'-' | b'0'..=b'9' => {
            let (value, consumed) = crate::number::parse_number(input, offset)?;
            if input
                .get(offset + consumed)
                .is_some_and(|&b| is_number_continuation(b))
            {
                return Err(ParseError::InvalidNumber { offset });
            }
            match value {
                crate::number::NumberValue::Int(v) => {
                    tape.push_number(tape::TAG_INT, v as u64);
                }
                crate::number::NumberValue::Uint(v) => {
                    tape.push_number(tape::TAG_UINT, v);
                }
                crate::number::NumberValue::Double(v) => {
                    tape.push_number(tape::TAG_DOUBLE, v.to_bits());
                }
            }
            Ok((i + 1, after_value_state(stack)))
        }
        _ => Err(ParseError::UnexpectedByte { offset, byte }),
    }
}

/// The root frame counts as one level of nesting, so a stack of
/// `max_depth + 1` frames (root plus `max_depth` nested containers) is the
/// deepest input accepted.
fn check_depth(stack: &[Frame], offset: usize, config: &ParserConfig) -> Result<()> {
    if stack.len() > config.max_depth + 1 {
        return Err(ParseError::DepthExceeded {
            offset,
            max_depth: config.max_depth,
        });
    }
    Ok(())
}

fn parse_key(
    input: &[u8],
    offset: usize,
    tape: &mut Tape,
    strings: &mut StringBuffer,
) -> Result<()> {
    let byte = input[offset];
    if byte != b'"' {
        return Err(ParseError::UnexpectedByte { offset, byte });
    }
    let (location, _end) = consume_string(input, offset, true, true, strings)?;
    tape.push(tape::TAG_STRING, tape::encode_string_payload(location));
    Ok(())
}

fn close_container(
    stack: &mut Vec<Frame>,
    tape: &mut Tape,
    offset: usize,
    expected: ContainerKind,
) -> Result<()> {
    let expected_byte = if expected == ContainerKind::Object { b'}' } else { b']' };
    let Some(frame) = stack.pop() else {
        return Err(ParseError::UnexpectedByte { offset, byte: expected_byte });
    };
    if frame.kind != expected {
        return Err(ParseError::UnexpectedByte { offset, byte: expected_byte });
    }
    let close_tag = match expected {
        ContainerKind::Object => tape::TAG_OBJECT_CLOSE,
        ContainerKind::Array => tape::TAG_ARRAY_CLOSE,
        ContainerKind::Root => unreachable!("ROOT is never closed via close_container"),
    };
    let close_index = tape.push(close_tag, frame.open_index as u64);
    tape.set_payload(frame.open_index, close_index as u64);
    Ok(())
}

fn expect_literal(input: &[u8], offset: usize, literal: &[u8]) -> Result<()> {
    let bytes = input
        .get(offset..offset + literal.len())
        .ok_or(ParseError::UnexpectedByte { offset, byte: input[offset] })?;
    if bytes != literal {
        return Err(ParseError::UnexpectedByte { offset, byte: input[offset] });
    }
    if let Some(&next) = input.get(offset + literal.len()) {
        if !is_terminator(next) {
            return Err(ParseError::UnexpectedByte {
                offset: offset + literal.len(),
                byte: next,
            });
        }
    }
    Ok(())
}

const fn is_terminator(byte: u8) -> bool {
    matches!(
        byte,
        b' ' | b'\t' | b'\n' | b'\r' | b'{' | b'}' | b'[' | b']' | b':' | b','
    )
}

/// A byte that would extend a JSON number token (another digit, or one of
/// the grammar's punctuation) if it immediately follows the bytes
/// `parse_number` already consumed. Seeing one here means the grammar scan
/// stopped short of a full token -- e.g. "007" only consumes the leading
/// `0`, leaving a continuation digit behind -- and the whole number is
/// malformed rather than two adjacent tokens.
const fn is_number_continuation(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-')
}
