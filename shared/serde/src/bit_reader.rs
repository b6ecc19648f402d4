use crate::error::SerdeErr;

/// Reads bits back from a byte image produced by a
/// [`BitWriter`](crate::BitWriter).
///
/// Both sides must read fields in exactly the order they were written; the
/// stream carries no schema. Running off the end of the buffer is reported
/// as a [`SerdeErr`], never a panic: a truncated image is a recoverable
/// condition for the caller to surface.
pub struct BitReader<'b> {
    buffer: &'b [u8],
    byte_index: usize,
    bit_index: u8,
}

impl<'b> BitReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            byte_index: 0,
            bit_index: 0,
        }
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        if self.byte_index >= self.buffer.len() {
            return Err(SerdeErr);
        }

        let bit = (self.buffer[self.byte_index] >> self.bit_index) & 1 != 0;

        self.bit_index += 1;
        if self.bit_index >= 8 {
            self.bit_index = 0;
            self.byte_index += 1;
        }

        Ok(bit)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let mut byte = 0u8;
        for i in 0..8 {
            if self.read_bit()? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }

    /// Bits remaining before the stream is exhausted.
    pub fn bits_remaining(&self) -> u32 {
        let consumed = (self.byte_index as u32) * 8 + self.bit_index as u32;
        (self.buffer.len() as u32) * 8 - consumed
    }
}
