//! Option decoder tests

use libcli::cli::*;

fn set_spec() -> CommandSpec<'static> {
    CommandSpec {
        name: "set",
        help: "",
        optstring: "t:v:",
        optypes: "%i%f",
        argc: 2,
        callback: None,
    }
}

#[test]
fn test_single_integer_option() {
    let spec = CommandSpec {
        name: "cmd",
        help: "",
        optstring: "t:",
        optypes: "%i",
        argc: 1,
        callback: None,
    };
    let tokens = tokenize_args("cmd -t 5").unwrap();
    let decoded = decode(&tokens, &spec, NumberPolicy::Lenient).unwrap();

    let args = decoded.args.unwrap();
    assert_eq!(args.as_slice(), &[ParsedArg::Int(5)]);
    assert_eq!(args[0].tag(), 'i');
    assert_eq!(args[0].as_int(), Some(5));
    assert_eq!(decoded.argc, 2);
}

#[test]
fn test_zero_argument_short_circuit() {
    let spec = CommandSpec {
        name: "ping",
        help: "",
        optstring: "",
        optypes: "",
        argc: 0,
        callback: None,
    };
    let decoded = decode(&["ping"], &spec, NumberPolicy::Lenient).unwrap();
    assert_eq!(decoded, Decoded { argc: 1, args: None });
}

#[test]
fn test_argument_count_mismatch() {
    let spec = set_spec();
    for line in ["set", "set -t 3", "set -t 3 -v 2 -t 4", "set -t 3 -v 2 extra"] {
        let tokens = tokenize_args(line).unwrap();
        assert_eq!(
            decode(&tokens, &spec, NumberPolicy::Lenient),
            Err(Error::ArgumentCountMismatch),
            "{line}"
        );
    }
}

#[test]
fn test_inconsistent_spec_is_reported() {
    // Bypasses registration, which would refuse this spec
    let spec = CommandSpec {
        name: "bad",
        help: "",
        optstring: "t:v:",
        optypes: "%i",
        argc: 2,
        callback: None,
    };
    let tokens = tokenize_args("bad -t 1 -v 2").unwrap();
    assert_eq!(
        decode(&tokens, &spec, NumberPolicy::Lenient),
        Err(Error::InconsistentSpec)
    );
}

#[test]
fn test_unrecognized_option_stops_decoding() {
    let spec = set_spec();
    let tokens = tokenize_args("set -q -v 2").unwrap();
    let decoded = decode(&tokens, &spec, NumberPolicy::Lenient).unwrap();
    assert_eq!(decoded.argc, 3);
    assert_eq!(decoded.args.unwrap().len(), 0);
}

#[test]
fn test_operand_stops_decoding() {
    let spec = set_spec();
    let tokens = tokenize_args("set -t 3 file").unwrap();
    let decoded = decode(&tokens, &spec, NumberPolicy::Lenient).unwrap();
    assert_eq!(decoded.args.unwrap().as_slice(), &[ParsedArg::Int(3)]);
}

#[test]
fn test_repeated_option_takes_next_type() {
    let spec = set_spec();
    let tokens = tokenize_args("set -t 3 -t 4.5").unwrap();
    let decoded = decode(&tokens, &spec, NumberPolicy::Lenient).unwrap();
    assert_eq!(
        decoded.args.unwrap().as_slice(),
        &[ParsedArg::Int(3), ParsedArg::Float(4.5)]
    );
}

#[test]
fn test_reserved_type_keeps_later_values_aligned() {
    let spec = CommandSpec {
        name: "raw",
        help: "",
        optstring: "x:n:",
        optypes: "%x%i",
        argc: 2,
        callback: None,
    };
    let tokens = tokenize_args("raw -x ff -n 2").unwrap();
    let decoded = decode(&tokens, &spec, NumberPolicy::Lenient).unwrap();
    assert_eq!(decoded.argc, 3);
    assert_eq!(decoded.args.unwrap().as_slice(), &[ParsedArg::Int(2)]);
}

#[test]
fn test_flags_are_not_counted() {
    let spec = CommandSpec {
        name: "cmd",
        help: "",
        optstring: "at:",
        optypes: "%i",
        argc: 1,
        callback: None,
    };
    for line in ["cmd -a -t 3", "cmd -at 3", "cmd -at3", "cmd -t 3"] {
        let tokens = tokenize_args(line).unwrap();
        let decoded = decode(&tokens, &spec, NumberPolicy::Lenient).unwrap();
        assert_eq!(decoded.argc, 2, "{line}");
        assert_eq!(decoded.args.unwrap().as_slice(), &[ParsedArg::Int(3)], "{line}");
    }
}

#[test]
fn test_flags_on_command_without_arguments() {
    let spec = CommandSpec {
        name: "status",
        help: "",
        optstring: "v",
        optypes: "",
        argc: 0,
        callback: None,
    };
    let tokens = tokenize_args("status -v").unwrap();
    assert_eq!(
        decode(&tokens, &spec, NumberPolicy::Lenient),
        Ok(Decoded { argc: 1, args: None })
    );
}

#[test]
fn test_string_values_borrow_the_line() {
    let spec = CommandSpec {
        name: "say",
        help: "",
        optstring: "m:",
        optypes: "%s",
        argc: 1,
        callback: None,
    };
    let line = "say -mhello";
    let tokens = tokenize_args(line).unwrap();
    let decoded = decode(&tokens, &spec, NumberPolicy::Strict).unwrap();
    let args = decoded.args.unwrap();
    assert_eq!(args[0], ParsedArg::Str("hello"));
    assert_eq!(args[0].as_str(), Some("hello"));
    assert_eq!(args[0].as_float(), None);
    assert_eq!(args[0].tag(), 's');
}

#[test]
fn test_strict_policy() {
    let spec = set_spec();
    let tokens = tokenize_args("set -t 12 -v 1e-3").unwrap();
    let decoded = decode(&tokens, &spec, NumberPolicy::Strict).unwrap();
    assert_eq!(
        decoded.args.unwrap().as_slice(),
        &[ParsedArg::Int(12), ParsedArg::Float(1e-3)]
    );

    let tokens = tokenize_args("set -t 12 -v 1.5x").unwrap();
    assert_eq!(
        decode(&tokens, &spec, NumberPolicy::Strict),
        Err(Error::MalformedNumber)
    );
}

#[test]
fn test_option_type_tokenizer_alignment() {
    let tags = tokenize_types("%i%f%s").unwrap();
    let letters: String = tags.iter().map(|tag| tag.tag()).collect();
    assert_eq!(letters, "ifs");
}
