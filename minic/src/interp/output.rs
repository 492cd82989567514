//! Output sinks and the `print_i` built-in

use super::error::{InterpResult, RuntimeError};
use super::Value;
use std::io::Write;

/// Append-only destination for program output
pub trait OutputSink {
    /// Append `value` in decimal followed by a newline
    fn write_int(&mut self, value: i32) -> InterpResult<()>;
}

/// In-memory sink; output is read back after the run
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    buf: String,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl OutputSink for BufferSink {
    fn write_int(&mut self, value: i32) -> InterpResult<()> {
        use std::fmt::Write as _;
        writeln!(self.buf, "{value}").map_err(|e| RuntimeError::output_failed(&e.to_string()))
    }
}

/// Sink over any `std::io::Write`
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn write_int(&mut self, value: i32) -> InterpResult<()> {
        writeln!(self.writer, "{value}").map_err(|e| RuntimeError::output_failed(&e.to_string()))
    }
}

/// Builtin function type
pub type BuiltinFn = fn(&[Value], &mut dyn OutputSink) -> InterpResult<Value>;

/// A function implemented by the runtime
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: usize,
    pub func: BuiltinFn,
}

/// The built-in registry. minic ships exactly one.
pub const BUILTINS: &[Builtin] = &[Builtin {
    name: "print_i",
    arity: 1,
    func: builtin_print_i,
}];

pub fn lookup_builtin(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}

/// print_i(v: int) -> void
fn builtin_print_i(args: &[Value], sink: &mut dyn OutputSink) -> InterpResult<Value> {
    if args.len() != 1 {
        return Err(RuntimeError::arity_mismatch("print_i", 1, args.len()));
    }
    sink.write_int(args[0].expect_int()?)?;
    Ok(Value::Void)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::ErrorKind;

    #[test]
    fn test_buffer_sink_appends_lines() {
        let mut sink = BufferSink::new();
        sink.write_int(1).unwrap();
        sink.write_int(-1).unwrap();
        sink.write_int(9999).unwrap();
        assert_eq!(sink.as_str(), "1\n-1\n9999\n");
        assert_eq!(sink.into_string().lines().count(), 3);
    }

    #[test]
    fn test_writer_sink() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_int(i32::MIN).unwrap();
        assert_eq!(sink.into_inner(), b"-2147483648\n");
    }

    #[test]
    fn test_print_i() {
        let print_i = lookup_builtin("print_i").unwrap();
        assert_eq!(print_i.arity, 1);

        let mut sink = BufferSink::new();
        let result = (print_i.func)(&[Value::Int(7)], &mut sink).unwrap();
        assert_eq!(result, Value::Void);
        assert_eq!(sink.as_str(), "7\n");
    }

    #[test]
    fn test_print_i_rejects_arrays() {
        let mut sink = BufferSink::new();
        let err = builtin_print_i(&[Value::zeroed_array(1)], &mut sink).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
        assert!(sink.as_str().is_empty());
    }

    #[test]
    fn test_only_print_i_is_registered() {
        assert!(lookup_builtin("print_s").is_none());
        assert!(lookup_builtin("read_i").is_none());
        assert_eq!(BUILTINS.len(), 1);
    }
}
