//! Bytecode instruction representation and wire codec.
//!
//! Instructions are stored in their encoded form inside basic blocks and
//! decoded one at a time by the streaming iterator. The codec is a tag byte
//! followed by little-endian operands, then an optional source position.

use crate::opcode::{BlockId, Opcode, Register};
use core_types::SourcePosition;
use thiserror::Error;

/// A single bytecode instruction with optional source mapping
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// The opcode for this instruction
    pub opcode: Opcode,
    /// Optional source position for debugging
    pub source_position: Option<SourcePosition>,
}

/// Error decoding an instruction from its encoded form.
///
/// Blocks are only ever filled by the executable builder, so hitting one of
/// these on a built executable indicates a corrupted buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer ended in the middle of an instruction
    #[error("instruction stream ended unexpectedly at offset {0}")]
    UnexpectedEnd(usize),
    /// The tag byte does not name a known opcode
    #[error("unknown opcode tag {0}")]
    UnknownOpcodeTag(u8),
}

// Opcode tag bytes. Stable within a build; not a persistence format.
const TAG_LOAD_CONSTANT: u8 = 0;
const TAG_LOAD_UNDEFINED: u8 = 1;
const TAG_MOV: u8 = 2;
const TAG_ADD: u8 = 3;
const TAG_SUB: u8 = 4;
const TAG_MUL: u8 = 5;
const TAG_INCREMENT: u8 = 6;
const TAG_LESS_THAN: u8 = 7;
const TAG_JUMP: u8 = 8;
const TAG_JUMP_IF_FALSE: u8 = 9;
const TAG_CALL: u8 = 10;
const TAG_RETURN: u8 = 11;
const TAG_THROW: u8 = 12;

impl Instruction {
    /// Create a new instruction without source position
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            source_position: None,
        }
    }

    /// Create a new instruction with source position
    pub fn with_position(opcode: Opcode, position: SourcePosition) -> Self {
        Self {
            opcode,
            source_position: Some(position),
        }
    }

    /// Append the encoded form of this instruction to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match &self.opcode {
            Opcode::LoadConstant { dst, index } => {
                out.push(TAG_LOAD_CONSTANT);
                write_u32(out, dst.0);
                write_u32(out, *index);
            }
            Opcode::LoadUndefined { dst } => {
                out.push(TAG_LOAD_UNDEFINED);
                write_u32(out, dst.0);
            }
            Opcode::Mov { dst, src } => {
                out.push(TAG_MOV);
                write_u32(out, dst.0);
                write_u32(out, src.0);
            }
            Opcode::Add { dst, lhs, rhs } => {
                out.push(TAG_ADD);
                write_u32(out, dst.0);
                write_u32(out, lhs.0);
                write_u32(out, rhs.0);
            }
            Opcode::Sub { dst, lhs, rhs } => {
                out.push(TAG_SUB);
                write_u32(out, dst.0);
                write_u32(out, lhs.0);
                write_u32(out, rhs.0);
            }
            Opcode::Mul { dst, lhs, rhs } => {
                out.push(TAG_MUL);
                write_u32(out, dst.0);
                write_u32(out, lhs.0);
                write_u32(out, rhs.0);
            }
            Opcode::Increment { reg } => {
                out.push(TAG_INCREMENT);
                write_u32(out, reg.0);
            }
            Opcode::LessThan { dst, lhs, rhs } => {
                out.push(TAG_LESS_THAN);
                write_u32(out, dst.0);
                write_u32(out, lhs.0);
                write_u32(out, rhs.0);
            }
            Opcode::Jump { target } => {
                out.push(TAG_JUMP);
                write_u32(out, target.0 as u32);
            }
            Opcode::JumpIfFalse { condition, target } => {
                out.push(TAG_JUMP_IF_FALSE);
                write_u32(out, condition.0);
                write_u32(out, target.0 as u32);
            }
            Opcode::Call { function } => {
                out.push(TAG_CALL);
                write_u32(out, *function);
            }
            Opcode::Return { reg } => {
                out.push(TAG_RETURN);
                write_u32(out, reg.0);
            }
            Opcode::Throw { reg } => {
                out.push(TAG_THROW);
                write_u32(out, reg.0);
            }
        }

        match &self.source_position {
            Some(pos) => {
                out.push(1);
                write_u32(out, pos.line);
                write_u32(out, pos.column);
                write_u32(out, pos.offset);
            }
            None => out.push(0),
        }
    }

    /// Decode one instruction starting at `offset` in `bytes`.
    ///
    /// Returns the instruction and the offset just past it.
    pub fn decode(bytes: &[u8], offset: usize) -> Result<(Instruction, usize), DecodeError> {
        let mut cursor = offset;
        let tag = read_u8(bytes, &mut cursor)?;

        let opcode = match tag {
            TAG_LOAD_CONSTANT => Opcode::LoadConstant {
                dst: Register(read_u32(bytes, &mut cursor)?),
                index: read_u32(bytes, &mut cursor)?,
            },
            TAG_LOAD_UNDEFINED => Opcode::LoadUndefined {
                dst: Register(read_u32(bytes, &mut cursor)?),
            },
            TAG_MOV => Opcode::Mov {
                dst: Register(read_u32(bytes, &mut cursor)?),
                src: Register(read_u32(bytes, &mut cursor)?),
            },
            TAG_ADD => Opcode::Add {
                dst: Register(read_u32(bytes, &mut cursor)?),
                lhs: Register(read_u32(bytes, &mut cursor)?),
                rhs: Register(read_u32(bytes, &mut cursor)?),
            },
            TAG_SUB => Opcode::Sub {
                dst: Register(read_u32(bytes, &mut cursor)?),
                lhs: Register(read_u32(bytes, &mut cursor)?),
                rhs: Register(read_u32(bytes, &mut cursor)?),
            },
            TAG_MUL => Opcode::Mul {
                dst: Register(read_u32(bytes, &mut cursor)?),
                lhs: Register(read_u32(bytes, &mut cursor)?),
                rhs: Register(read_u32(bytes, &mut cursor)?),
            },
            TAG_INCREMENT => Opcode::Increment {
                reg: Register(read_u32(bytes, &mut cursor)?),
            },
            TAG_LESS_THAN => Opcode::LessThan {
                dst: Register(read_u32(bytes, &mut cursor)?),
                lhs: Register(read_u32(bytes, &mut cursor)?),
                rhs: Register(read_u32(bytes, &mut cursor)?),
            },
            TAG_JUMP => Opcode::Jump {
                target: BlockId(read_u32(bytes, &mut cursor)? as usize),
            },
            TAG_JUMP_IF_FALSE => Opcode::JumpIfFalse {
                condition: Register(read_u32(bytes, &mut cursor)?),
                target: BlockId(read_u32(bytes, &mut cursor)? as usize),
            },
            TAG_CALL => Opcode::Call {
                function: read_u32(bytes, &mut cursor)?,
            },
            TAG_RETURN => Opcode::Return {
                reg: Register(read_u32(bytes, &mut cursor)?),
            },
            TAG_THROW => Opcode::Throw {
                reg: Register(read_u32(bytes, &mut cursor)?),
            },
            other => return Err(DecodeError::UnknownOpcodeTag(other)),
        };

        let source_position = if read_u8(bytes, &mut cursor)? != 0 {
            Some(SourcePosition {
                line: read_u32(bytes, &mut cursor)?,
                column: read_u32(bytes, &mut cursor)?,
                offset: read_u32(bytes, &mut cursor)?,
            })
        } else {
            None
        };

        Ok((
            Instruction {
                opcode,
                source_position,
            },
            cursor,
        ))
    }
}

fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn read_u8(bytes: &[u8], cursor: &mut usize) -> Result<u8, DecodeError> {
    let byte = *bytes
        .get(*cursor)
        .ok_or(DecodeError::UnexpectedEnd(*cursor))?;
    *cursor += 1;
    Ok(byte)
}

fn read_u32(bytes: &[u8], cursor: &mut usize) -> Result<u32, DecodeError> {
    let end = *cursor + 4;
    let slice = bytes
        .get(*cursor..end)
        .ok_or(DecodeError::UnexpectedEnd(*cursor))?;
    *cursor = end;
    // get() guarantees the slice is exactly four bytes
    Ok(u32::from_le_bytes(slice.try_into().unwrap()))
}
