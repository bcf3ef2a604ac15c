//! Code emitter - block-structured text buffer for generated source
//!
//! The emitter knows nothing about expressions or targets. It appends lines at the current indentation and opens
//! blocks whose delimiters are supplied by the active target adapter.
//!
//! ## Notes
//! - [`CodeEmitter::try_block`] always writes the block terminator and restores the indentation, including when the
//!   body returns `Err`. Text emitted up to a failure therefore stays balanced.
//! - Blocks nest without limit; nesting is purely lexical.

/// Open/close tokens of a block, e.g. `{`/`}` for brace targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDelimiters {
    pub open: &'static str,
    pub close: &'static str,
}

impl BlockDelimiters {
    pub const BRACES: BlockDelimiters = BlockDelimiters { open: "{", close: "}" };
}

/// A buffer for building target source code with proper indentation
#[derive(Debug)]
pub struct CodeEmitter {
    buffer: String,
    indent_level: usize,
    indent_str: String,
    delimiters: BlockDelimiters,
}

impl CodeEmitter {
    pub fn new(indent_width: usize, delimiters: BlockDelimiters) -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_str: " ".repeat(indent_width),
            delimiters,
        }
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Get current buffer as string slice
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Current block nesting depth.
    pub fn depth(&self) -> usize {
        self.indent_level
    }

    /// Write a line with current indentation
    pub fn line(&mut self, s: &str) {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write a blank line
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    /// Write one line comment per line of `text`.
    pub fn comment(&mut self, prefix: &str, text: &str) {
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.line(prefix);
            } else {
                self.line(&format!("{} {}", prefix, line));
            }
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(&self.indent_str);
        }
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    fn open_line(&self, header: &str) -> String {
        if header.is_empty() {
            self.delimiters.open.to_string()
        } else {
            format!("{} {}", header, self.delimiters.open)
        }
    }

    /// Write a block with delimiters around the lines `f` emits.
    ///
    /// ## Errors
    /// Returns whatever `f` returns; the block is closed either way.
    pub fn try_block<E, F>(&mut self, header: &str, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        let open = self.open_line(header);
        self.line(&open);
        self.indent();
        let result = f(self);
        self.dedent();
        self.line(self.delimiters.close);
        result
    }

    /// Write a block for infallible bodies.
    pub fn block<F>(&mut self, header: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let result: Result<(), std::convert::Infallible> = self.try_block(header, |e| {
            f(e);
            Ok(())
        });
        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Write a two-segment block: `header { first } continuation { second }`.
    ///
    /// The closing delimiter of the first segment and the opening of the second share one line, as brace targets
    /// write `} else {`. When `first` fails, `second` is skipped and the first segment is still closed.
    pub fn try_chained_block<E, F, G>(&mut self, header: &str, first: F, continuation: &str, second: G) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
        G: FnOnce(&mut Self) -> Result<(), E>,
    {
        let open = self.open_line(header);
        self.line(&open);
        self.indent();
        let result = first(self);
        self.dedent();
        if result.is_err() {
            self.line(self.delimiters.close);
            return result;
        }

        let joint = format!("{} {}", self.delimiters.close, self.open_line(continuation));
        self.line(&joint);
        self.indent();
        let result = second(self);
        self.dedent();
        self.line(self.delimiters.close);
        result
    }
}
