//! Basic blocks and the streaming instruction iterator.
//!
//! A basic block is a straight-line run of instructions held in encoded
//! form. Blocks are filled by the executable builder and immutable once the
//! executable is built; the interpreter consumes them through
//! [`InstructionStreamIterator`], a forward-only decoder restarted from the
//! block's first instruction on every (re-)entry.

use crate::instruction::Instruction;

/// An immutable straight-line sequence of encoded instructions.
///
/// Identified by its [`BlockId`](crate::BlockId) position within the owning
/// executable. A block ends implicitly (fallthrough) or at a terminator
/// instruction; no explicit terminator is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicBlock {
    buffer: Vec<u8>,
}

impl BasicBlock {
    pub(crate) fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub(crate) fn append(&mut self, instruction: &Instruction) {
        instruction.encode_into(&mut self.buffer);
    }

    /// The encoded instruction stream of this block.
    pub fn instruction_stream(&self) -> InstructionStreamIterator<'_> {
        InstructionStreamIterator {
            bytes: &self.buffer,
            offset: 0,
        }
    }

    /// Size of the encoded stream in bytes.
    pub fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether this block contains no instructions.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Forward-only streaming decoder over a block's instruction stream.
///
/// Decodes one instruction per step and reports stream end via [`at_end`]
/// (or iterator exhaustion). The iterator borrows the block; requesting a
/// fresh one restarts from the first instruction.
///
/// [`at_end`]: InstructionStreamIterator::at_end
#[derive(Debug, Clone)]
pub struct InstructionStreamIterator<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> InstructionStreamIterator<'a> {
    /// Whether the stream has been fully consumed.
    pub fn at_end(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// Byte offset of the next instruction to decode.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for InstructionStreamIterator<'a> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        if self.at_end() {
            return None;
        }
        // Blocks are only written by the builder; a decode failure here
        // means the buffer was corrupted after build.
        let (instruction, next_offset) = Instruction::decode(self.bytes, self.offset)
            .unwrap_or_else(|err| {
                panic!(
                    "corrupted instruction stream at offset {}: {}",
                    self.offset, err
                )
            });
        self.offset = next_offset;
        Some(instruction)
    }
}
