//! Mock console transport and recording handler shared by the integration tests

#![allow(dead_code)]

use core::fmt;
use std::collections::VecDeque;

use libcli::cli::{CommandSpec, Handler, ParsedArg};
use libcli::transport::{Read, Write};

/// Mock console: hands out queued input one byte per read and records writes
#[derive(Debug, Default)]
pub struct MockConsole {
    input: VecDeque<u8>,
    pub writes: Vec<u8>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MockConsole {
    /// Create a console with pending input
    pub fn new(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Queue more input
    pub fn push_input(&mut self, input: &[u8]) {
        self.input.extend(input.iter().copied());
    }

    /// Everything written so far, as text
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.writes).into_owned()
    }

    /// Take everything written so far, as text
    pub fn take_output(&mut self) -> String {
        let output = self.output();
        self.writes.clear();
        output
    }
}

impl Read for MockConsole {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.fail_reads {
            return Err(());
        }
        match (buf.first_mut(), self.input.pop_front()) {
            (Some(slot), Some(byte)) => {
                *slot = byte;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

impl Write for MockConsole {
    type Error = ();

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_writes {
            return Err(());
        }
        self.writes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Owned copy of a decoded argument
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i32),
    Float(f32),
}

impl From<&ParsedArg<'_>> for Value {
    fn from(arg: &ParsedArg<'_>) -> Self {
        match *arg {
            ParsedArg::Str(value) => Value::Str(value.to_string()),
            ParsedArg::Int(value) => Value::Int(value),
            ParsedArg::Float(value) => Value::Float(value),
        }
    }
}

/// One recorded handler invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub argc: usize,
    pub args: Option<Vec<Value>>,
}

/// Handler recording every invocation and printing a marker line
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Handler for Recorder {
    fn call(&mut self, argc: usize, args: Option<&[ParsedArg<'_>]>, out: &mut dyn fmt::Write) {
        self.calls.push(Call {
            argc,
            args: args.map(|args| args.iter().map(Value::from).collect()),
        });
        let _ = writeln!(out, "recorded {}", argc);
    }
}

/// Build a command spec with a handler attached
pub fn spec<'a>(
    name: &'a str,
    optstring: &'a str,
    optypes: &'a str,
    argc: usize,
    callback: &'a mut dyn Handler,
) -> CommandSpec<'a> {
    CommandSpec {
        name,
        help: "",
        optstring,
        optypes,
        argc,
        callback: Some(callback),
    }
}
