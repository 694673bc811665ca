use std::collections::VecDeque;
use std::path::PathBuf;

use cmdline_core::{CommandLineError, CommandLineParser, nul_terminated_str};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn tokens(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Default)]
struct Partition {
    sides: (u32, u32),
    rejected: Vec<String>,
}

impl Partition {
    fn set_side_log2(&mut self, value: &str) -> bool {
        match value.parse::<u32>() {
            Ok(k) if k < 31 => {
                self.sides = (1 << k, 1 << k);
                true
            }
            _ => {
                self.rejected.push(value.to_string());
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Integer options
// ---------------------------------------------------------------------------

#[test]
fn test_integer_options_bind_distinct_flags() {
    let mut x = 0i32;
    let mut y = 0u64;
    let mut args = tokens(&["-x", "5", "-y", "18446744073709551615"]);

    let mut parser = CommandLineParser::new();
    parser
        .add_option_int("-x", &mut x, false)
        .add_option_int("-y", &mut y, false);
    assert!(parser.parse_command_line(&mut args));
    drop(parser);

    assert_eq!(x, 5);
    assert_eq!(y, u64::MAX);
    assert!(args.is_empty());
}

#[test]
fn test_integer_non_numeric_fails_and_keeps_prior_value() {
    let mut x = 11i32;
    let mut args = tokens(&["-x", "abc"]);

    let mut parser = CommandLineParser::new();
    parser.add_option_int("-x", &mut x, false);
    assert!(!parser.parse_command_line(&mut args));
    drop(parser);

    assert_eq!(x, 11);
}

#[test]
fn test_integer_overflow_is_rejected() {
    let mut x = 3u8;
    let mut parser = CommandLineParser::new();
    parser.add_option_int("-x", &mut x, false);

    let err = parser.try_parse_argv(&["-x", "300"]).unwrap_err();
    drop(parser);

    assert!(matches!(
        err,
        CommandLineError::InvalidConversion { ref option, ref value, .. }
            if option == "-x" && value == "300"
    ));
    assert_eq!(x, 3);
}

#[test]
fn test_value_flag_at_end_fails() {
    let mut x = 0i32;
    let mut args = tokens(&["-x"]);

    let mut parser = CommandLineParser::new();
    parser.add_option_int("-x", &mut x, false);
    assert!(!parser.parse_command_line(&mut args));
    assert_eq!(
        parser.try_parse_argv(&["-x"]),
        Err(CommandLineError::MissingValue {
            option: "-x".into()
        })
    );
}

// ---------------------------------------------------------------------------
// Strings and lists
// ---------------------------------------------------------------------------

#[test]
fn test_string_targets_accept_from_string_types() {
    let mut name = String::new();
    let mut logfile = PathBuf::new();
    let mut args = tokens(&["-name", "", "-logfile", "/tmp/run.log"]);

    let mut parser = CommandLineParser::new();
    parser
        .add_option_string("-name", &mut name, false)
        .add_option_string("-logfile", &mut logfile, false);
    assert!(parser.parse_command_line(&mut args));
    drop(parser);

    assert_eq!(name, "");
    assert_eq!(logfile, PathBuf::from("/tmp/run.log"));
    assert!(args.is_empty());
}

#[test]
fn test_string_buffer_capacity() {
    let mut buffer = [0u8; 8];
    let mut parser = CommandLineParser::new();
    parser.add_option_string_buffer("-s", &mut buffer, false);

    assert!(parser.parse_argv(&["-s", "1234567"]));
    let err = parser.try_parse_argv(&["-s", "12345678"]).unwrap_err();
    drop(parser);

    assert_eq!(
        err,
        CommandLineError::CapacityExceeded {
            option: "-s".into(),
            len: 9,
            capacity: 8,
        }
    );
    assert_eq!(nul_terminated_str(&buffer).unwrap(), "1234567");
}

#[test]
fn test_stringlist_accumulates_in_order() {
    let mut includes: Vec<String> = Vec::new();
    let mut args = tokens(&["-I", "a", "-I", "b"]);

    let mut parser = CommandLineParser::new();
    parser.add_option_stringlist("-I", &mut includes, false);
    assert!(parser.parse_command_line(&mut args));
    drop(parser);

    assert_eq!(includes, ["a", "b"]);
    assert!(args.is_empty());
}

#[test]
fn test_stringlist_is_never_cleared() {
    let mut levels: VecDeque<String> = VecDeque::from(["default".to_string()]);
    let mut parser = CommandLineParser::new();
    parser.add_option_stringlist("-level", &mut levels, false);
    assert!(parser.parse_argv(&["-level", "a=1"]));
    assert!(parser.parse_argv(&["-level", "a=1"]));
    drop(parser);

    assert_eq!(levels, ["default", "a=1", "a=1"]);
}

#[test]
fn test_stringlist_value_is_not_split() {
    let mut values: Vec<String> = Vec::new();
    let mut parser = CommandLineParser::new();
    parser.add_option_stringlist("-I", &mut values, false);
    assert!(parser.parse_argv(&["-I", "a,b c"]));
    drop(parser);

    assert_eq!(values, ["a,b c"]);
}

// ---------------------------------------------------------------------------
// Boolean and method options
// ---------------------------------------------------------------------------

#[test]
fn test_boolean_consumes_only_the_flag() {
    let mut verbose = false;
    let mut args = tokens(&["-v", "file.txt"]);

    let mut parser = CommandLineParser::new();
    parser.add_option_bool("-v", &mut verbose, false);
    assert!(parser.parse_command_line(&mut args));
    drop(parser);

    assert!(verbose);
    assert_eq!(args, ["file.txt"]);
}

#[test]
fn test_method_callback_applies_value() {
    let mut partition = Partition::default();
    let mut args = tokens(&["-n", "3", "extra"]);

    let mut parser = CommandLineParser::new();
    parser.add_option_method("-n", &mut partition, Partition::set_side_log2, false);
    assert!(parser.parse_command_line(&mut args));
    drop(parser);

    assert_eq!(partition.sides, (8, 8));
    assert_eq!(args, ["extra"]);
}

#[test]
fn test_method_rejection_fails_after_one_value() {
    let mut partition = Partition::default();
    let mut verbose = false;
    let mut parser = CommandLineParser::new();
    parser
        .add_option_method("-n", &mut partition, Partition::set_side_log2, true)
        .add_option_bool("-v", &mut verbose, false);

    let err = parser.try_parse_argv(&["-n", "big", "-v"]).unwrap_err();
    drop(parser);

    assert_eq!(
        err,
        CommandLineError::CallbackRejected {
            option: "-n".into(),
            value: "big".into(),
        }
    );
    assert_eq!(partition.rejected, ["big"]);
    assert!(!verbose);
}

#[test]
fn test_method_rejection_removes_flag_and_value() {
    let mut partition = Partition::default();
    let mut args = tokens(&["-n", "bad", "tail"]);

    let mut parser = CommandLineParser::new();
    parser.add_option_method("-n", &mut partition, Partition::set_side_log2, false);
    assert!(!parser.parse_command_line(&mut args));
    drop(parser);

    assert_eq!(args, ["tail"]);
    assert_eq!(partition.rejected, ["bad"]);
    assert_eq!(partition.sides, (0, 0));
}

#[test]
fn test_rejected_value_is_consumed_for_every_kind() {
    let mut x = 0i32;
    let mut buffer = [0u8; 4];
    let mut args = tokens(&["-x", "nope", "a", "-s", "too-long", "b"]);

    let mut parser = CommandLineParser::new();
    parser
        .add_option_int("-x", &mut x, false)
        .add_option_string_buffer("-s", &mut buffer, false);
    assert!(!parser.parse_command_line(&mut args));
    assert_eq!(args, ["a", "-s", "too-long", "b"]);
    assert!(!parser.parse_command_line(&mut args));
    drop(parser);

    assert_eq!(args, ["a", "b"]);
    assert_eq!(x, 0);
    assert_eq!(buffer, [0u8; 4]);
}

#[test]
fn test_closure_callback() {
    let mut seen: Vec<String> = Vec::new();
    let mut parser = CommandLineParser::new();
    parser.add_option_method(
        "-D",
        &mut seen,
        |seen: &mut Vec<String>, value: &str| {
            seen.push(value.to_uppercase());
            value.contains('=')
        },
        false,
    );
    assert!(parser.parse_argv(&["-D", "k=v"]));
    drop(parser);

    assert_eq!(seen, ["K=V"]);
}

// ---------------------------------------------------------------------------
// Keep policy and stream forms
// ---------------------------------------------------------------------------

#[test]
fn test_keep_false_removes_pair() {
    let mut x = 0i32;
    let mut args = tokens(&["a", "-x", "5", "b"]);

    let mut parser = CommandLineParser::new();
    parser.add_option_int("-x", &mut x, false);
    assert!(parser.parse_command_line(&mut args));
    drop(parser);

    assert_eq!(args, ["a", "b"]);
}

#[test]
fn test_keep_true_leaves_pair_in_place() {
    let mut x = 0i32;
    let mut args = tokens(&["a", "-x", "5", "b"]);

    let mut parser = CommandLineParser::new();
    parser.add_option_int("-x", &mut x, true);
    assert!(parser.parse_command_line(&mut args));
    drop(parser);

    assert_eq!(x, 5);
    assert_eq!(args, ["a", "-x", "5", "b"]);
}

#[test]
fn test_reparse_of_consumed_stream_is_noop() {
    let mut x = 0i32;
    let mut args = tokens(&["-x", "5"]);

    let mut parser = CommandLineParser::new();
    parser.add_option_int("-x", &mut x, false);
    assert!(parser.parse_command_line(&mut args));
    assert!(args.is_empty());
    assert!(parser.parse_command_line(&mut args));
    drop(parser);

    assert!(args.is_empty());
    assert_eq!(x, 5);
}

#[test]
fn test_unrecognized_tokens_pass_through() {
    let mut x = 0i32;
    let mut args = tokens(&["--x", "-x5", "-X", "7"]);

    let mut parser = CommandLineParser::new();
    parser.add_option_int("-x", &mut x, false);
    assert!(parser.parse_command_line(&mut args));
    drop(parser);

    assert_eq!(x, 0);
    assert_eq!(args, ["--x", "-x5", "-X", "7"]);
}

#[test]
fn test_partial_mutation_survives_failure() {
    let mut x = 0i32;
    let mut tag = String::new();
    let mut args = tokens(&["-t", "first", "keep-me", "-x", "oops", "-t", "second"]);

    let mut parser = CommandLineParser::new();
    parser
        .add_option_string("-t", &mut tag, false)
        .add_option_int("-x", &mut x, false);
    assert!(!parser.parse_command_line(&mut args));
    drop(parser);

    assert_eq!(tag, "first");
    assert_eq!(x, 0);
    assert_eq!(args, ["keep-me", "-t", "second"]);
}

#[test]
fn test_argv_form_matches_but_never_removes() {
    let argv: Vec<String> = tokens(&["-x", "5", "-v", "tail"]);
    let mut x = 0i32;
    let mut verbose = false;

    let mut parser = CommandLineParser::new();
    parser
        .add_option_int("-x", &mut x, false)
        .add_option_bool("-v", &mut verbose, false);
    assert!(parser.parse_argv(&argv));
    drop(parser);

    assert_eq!(x, 5);
    assert!(verbose);
    assert_eq!(argv.len(), 4);
}

#[test]
fn test_shared_list_handed_to_second_parser() {
    let mut cpus = 1usize;
    let mut levels: Vec<String> = Vec::new();
    let mut app_levels: Vec<String> = Vec::new();
    let mut iterations = 1u32;
    let mut args = tokens(&["-ll:cpu", "4", "-level", "dma=2", "-i", "10", "input"]);

    let mut runtime = CommandLineParser::new();
    runtime
        .add_option_int("-ll:cpu", &mut cpus, false)
        .add_option_stringlist("-level", &mut levels, true);
    assert!(runtime.parse_command_line(&mut args));
    drop(runtime);
    assert_eq!(args, ["-level", "dma=2", "-i", "10", "input"]);

    let mut app = CommandLineParser::new();
    app.add_option_stringlist("-level", &mut app_levels, false)
        .add_option_int("-i", &mut iterations, false);
    assert!(app.parse_command_line(&mut args));
    drop(app);

    assert_eq!(cpus, 4);
    assert_eq!(levels, ["dma=2"]);
    assert_eq!(app_levels, ["dma=2"]);
    assert_eq!(iterations, 10);
    assert_eq!(args, ["input"]);
}
