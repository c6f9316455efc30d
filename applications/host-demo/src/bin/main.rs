//! Interactive demo of the command interpreter on a host terminal.
//!
//! Standard input stands in for a serial receive line: a reader thread pushes
//! bytes into a channel, and the main loop polls the shell once per
//! millisecond without ever blocking on the terminal.

use core::fmt::{self, Write as _};
use std::io::{self, Read as _, Write as _};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use libcli::cli::{CommandSpec, Handler, ParsedArg, Shell};
use libcli::transport::{Read, Write};

/// Terminal transport: non-blocking reads from a stdin thread, writes to stdout
struct Terminal {
    rx: Receiver<u8>,
}

#[derive(Debug)]
enum TerminalError {
    Disconnected,
    Io,
}

impl Terminal {
    fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for byte in io::stdin().lock().bytes() {
                let Ok(byte) = byte else { break };
                // Line-buffered terminals end lines with LF; the shell expects CR
                let byte = if byte == b'\n' { b'\r' } else { byte };
                if tx.send(byte).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }
}

impl Read for Terminal {
    type Error = TerminalError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let Some(slot) = buf.first_mut() else {
            return Ok(0);
        };
        match self.rx.try_recv() {
            Ok(byte) => {
                *slot = byte;
                Ok(1)
            }
            Err(TryRecvError::Empty) => Ok(0),
            Err(TryRecvError::Disconnected) => Err(TerminalError::Disconnected),
        }
    }
}

impl Write for Terminal {
    type Error = TerminalError;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        io::stdout().write(buf).map_err(|_| TerminalError::Io)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        io::stdout().flush().map_err(|_| TerminalError::Io)
    }
}

/// Prints every decoded argument together with the command name
struct PrintArgs {
    name: &'static str,
}

impl Handler for PrintArgs {
    fn call(&mut self, _argc: usize, args: Option<&[ParsedArg<'_>]>, out: &mut dyn fmt::Write) {
        for arg in args.unwrap_or_default() {
            let _ = match arg {
                ParsedArg::Str(value) => writeln!(out, "[{}] parsed arg [{}]", self.name, value),
                ParsedArg::Int(value) => writeln!(out, "[{}] parsed arg [{}]", self.name, value),
                ParsedArg::Float(value) => {
                    writeln!(out, "[{}] parsed arg [{:.6}]", self.name, value)
                }
            };
        }
    }
}

fn main() {
    let mut single = PrintArgs {
        name: "cli_test_get_single_arg",
    };
    let mut double = PrintArgs {
        name: "cli_test_get_double_args",
    };
    let mut triple = PrintArgs {
        name: "cli_test_get_triple_args",
    };

    let mut shell = Shell::new(Terminal::spawn());
    // The terminal echoes typed characters itself
    shell.set_echo(false);

    let registered = shell.register_commands([
        CommandSpec {
            name: single.name,
            help: "get single arg from CLI",
            optstring: "t:",
            optypes: "%i",
            argc: 1,
            callback: Some(&mut single),
        },
        CommandSpec {
            name: double.name,
            help: "get double args from CLI",
            optstring: "t:v:",
            optypes: "%i%f",
            argc: 2,
            callback: Some(&mut double),
        },
        CommandSpec {
            name: triple.name,
            help: "get triple args from CLI",
            optstring: "t:v:j:",
            optypes: "%i%f%s",
            argc: 3,
            callback: Some(&mut triple),
        },
    ]);
    if let Err(err) = registered {
        eprintln!("failed to register commands: {err:?}");
        return;
    }

    println!("type `help` to list the commands, Ctrl-D to quit");
    loop {
        match shell.poll() {
            Ok(_) => {}
            Err(libcli::cli::Error::Transport) => break,
            // Rejected lines were already reported on the console
            Err(_) => {}
        }
        thread::sleep(Duration::from_millis(1));
    }
}
