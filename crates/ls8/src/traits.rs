use std::io::{self, Write};

/// A read-only view of the machine state, for tracing and breakpoints.
pub trait CpuView {
    fn pc(&self) -> u16;
    fn fl(&self) -> u8;
    fn sp(&self) -> u8;
    /// Register value. Out-of-range indices read as zero.
    fn r(&self, x: u8) -> u8;
    /// Memory value. Out-of-range addresses read as zero.
    fn peek(&self, addr: u16) -> u8;
}

/// Where `PRN` sends its values.
pub trait Output {
    fn print(&mut self, value: u8) -> io::Result<()>;
}

impl Output for () {
    fn print(&mut self, _value: u8) -> io::Result<()> {
        Ok(())
    }
}

impl Output for Vec<u8> {
    fn print(&mut self, value: u8) -> io::Result<()> {
        self.push(value);
        Ok(())
    }
}

impl<T: Output + ?Sized> Output for &mut T {
    fn print(&mut self, value: u8) -> io::Result<()> {
        (**self).print(value)
    }
}

/// Sends the values to both outputs, in order.
impl<A: Output, B: Output> Output for (A, B) {
    fn print(&mut self, value: u8) -> io::Result<()> {
        self.0.print(value)?;
        self.1.print(value)
    }
}

/// Writes one decimal value per line.
pub struct Printer<W: Write> {
    writer: W,
}

impl<W: Write> Printer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl Printer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Output for Printer<W> {
    fn print(&mut self, value: u8) -> io::Result<()> {
        writeln!(self.writer, "{value}")?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printer_writes_decimal_lines() {
        let mut printer = Printer::new(Vec::new());
        printer.print(72).unwrap();
        printer.print(5).unwrap();
        assert_eq!(printer.into_inner(), b"72\n5\n");
    }

    #[test]
    fn tuple_fans_out() {
        let mut out = (Vec::new(), Printer::new(Vec::new()));
        out.print(255).unwrap();
        assert_eq!(out.0, vec![255]);
        assert_eq!(out.1.into_inner(), b"255\n");
    }
}
