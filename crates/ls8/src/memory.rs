use crate::fault::Fault;
use crate::opcodes::MEMORY_SIZE;

/// Main memory. Code and stack share the same cells.
pub struct Ram {
    ram: [u8; MEMORY_SIZE],
}

impl Ram {
    pub fn new() -> Self {
        Self {
            ram: [0; MEMORY_SIZE],
        }
    }

    pub fn read(&self, addr: impl Into<usize>) -> Result<u8, Fault> {
        let addr = addr.into();
        self.ram
            .get(addr)
            .copied()
            .ok_or(Fault::MemoryOutOfBounds { addr })
    }

    pub fn write(&mut self, addr: impl Into<usize>, value: u8) -> Result<(), Fault> {
        let addr = addr.into();
        let cell = self
            .ram
            .get_mut(addr)
            .ok_or(Fault::MemoryOutOfBounds { addr })?;
        *cell = value;
        Ok(())
    }

    /// Read without bounds errors. Past the end of memory reads as zero.
    pub fn peek(&self, addr: impl Into<usize>) -> u8 {
        self.ram.get(addr.into()).copied().unwrap_or(0)
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}
