use std::io::{BufRead, Write};

use crate::error::{RegistrarError, Result};

/// Line-oriented prompt/response surface shared by every operation.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `text` without a newline and blocks for one line of input.
    pub fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(RegistrarError::InputClosed);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
pub fn scripted(lines: &[&str]) -> Console<std::io::Cursor<Vec<u8>>, Vec<u8>> {
    let mut script = String::new();
    for l in lines {
        script.push_str(l);
        script.push('\n');
    }
    Console::new(std::io::Cursor::new(script.into_bytes()), Vec::new())
}

#[cfg(test)]
pub fn transcript(console: Console<std::io::Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(console.into_output()).expect("utf8 output")
}
