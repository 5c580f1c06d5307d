//! MIPS Control - CLI Entry Point
//!
//! Commands:
//! - `mips-control decode <word>` - Decode one instruction word
//! - `mips-control trace <program>` - Decode a whole program
//! - `mips-control inspect <program>` - Interactive signal inspector
//! - `mips-control table` - Print the decode tables

use clap::{Parser, Subcommand};
use mips_control::{ControlError, ControlSignals, FaultPolicy, OutputFormat, SimConfig};

#[derive(Parser)]
#[command(name = "mips-control")]
#[command(version)]
#[command(about = "Control unit of a single-cycle MIPS-style processor simulator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a single instruction
    Decode {
        /// Instruction word in hex (0x optional) or 0b binary
        #[arg(required_unless_present = "opcode", conflicts_with = "opcode")]
        word: Option<String>,
        /// Opcode field (decimal, 0x hex or 0b binary)
        #[arg(long, value_parser = parse_field)]
        opcode: Option<u8>,
        /// Function-code field, used with --opcode (default 0)
        #[arg(long, value_parser = parse_field, requires = "opcode")]
        funct: Option<u8>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Decode every word of a program file
    Trace {
        /// Path to the program file
        program: String,
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<String>,
        /// Report unsupported instructions and keep going
        #[arg(short, long)]
        skip_unsupported: bool,
        /// Maximum number of words to decode
        #[arg(short, long)]
        max: Option<usize>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Interactive signal inspector
    Inspect {
        /// Path to the program file
        program: String,
    },
    /// Print the main-decode and ALU-control tables
    Table,
    /// Run the built-in self-test
    Test,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Decode { word, opcode, funct, json }) => {
            decode_command(word, opcode, funct, json);
        }
        Some(Commands::Trace { program, config, skip_unsupported, max, json }) => {
            trace_command(&program, config, skip_unsupported, max, json);
        }
        Some(Commands::Inspect { program }) => {
            inspect_program(&program);
        }
        Some(Commands::Table) => {
            print_tables();
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("MIPS Control v{}", env!("CARGO_PKG_VERSION"));
            println!("Single-cycle control unit: opcode + funct → control signals");
            println!();
            println!("Use --help for available commands");
            println!();
            print_tables();
        }
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Parse a field value: decimal, `0x` hex or `0b` binary.
fn parse_field(text: &str) -> Result<u8, String> {
    let parsed = if let Some(hex) = text.strip_prefix("0x") {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = text.strip_prefix("0b") {
        u8::from_str_radix(bin, 2)
    } else {
        text.parse()
    };
    parsed.map_err(|e| format!("invalid field value `{}`: {}", text, e))
}

fn decode_command(word: Option<String>, opcode: Option<u8>, funct: Option<u8>, json: bool) {
    use mips_control::{decode, program::parse_word, Instruction};

    let instr = match (word, opcode) {
        (Some(text), _) => match parse_word(&text) {
            Ok(w) => Instruction::from_word(w),
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        },
        (None, Some(op)) => Instruction::new(op, funct.unwrap_or(0)),
        (None, None) => unreachable!("clap requires a word or --opcode"),
    };

    match decode(&instr) {
        Ok(signals) if json => match serde_json::to_string_pretty(&signals) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to serialize: {}", e);
                std::process::exit(1);
            }
        },
        Ok(signals) => {
            println!("{}", instr);
            print_signals(&signals);
        }
        Err(e) => {
            eprintln!("❌ {}: {}", instr, e);
            std::process::exit(1);
        }
    }
}

fn trace_command(path: &str, config_path: Option<String>, skip: bool, max: Option<usize>, json: bool) {
    use mips_control::{load_program, trace_program};

    let mut config = match config_path {
        Some(p) => match SimConfig::load(&p) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load config {}: {}", p, e);
                std::process::exit(1);
            }
        },
        None => SimConfig::default(),
    };
    if skip {
        config.on_unsupported = FaultPolicy::Skip;
    }
    if max.is_some() {
        config.max_instructions = max;
    }
    if json {
        config.output = OutputFormat::Json;
    }

    let program = match load_program(path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("❌ Failed to load program: {}", e);
            std::process::exit(1);
        }
    };

    let report = trace_program(&program.words, &config);

    match config.output {
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to serialize: {}", e);
                std::process::exit(1);
            }
        },
        OutputFormat::Text => {
            println!("━━━ Decode Trace: {} ━━━", path);
            for entry in &report.entries {
                match &entry.outcome {
                    Ok(signals) => println!(
                        "{:04x}: {:08x}  {:<5} {}",
                        entry.address,
                        entry.word,
                        entry.mnemonic(),
                        signals
                    ),
                    Err(e) => println!(
                        "{:04x}: {:08x}  ???   ✗ {} (line {})",
                        entry.address,
                        entry.word,
                        e,
                        program.lines.get(entry.index).copied().unwrap_or(0)
                    ),
                }
            }
            println!();
            println!("Decoded: {}  Unsupported: {}", report.decoded, report.faults);
            if report.truncated {
                println!("⚠️  Stopped at instruction limit. Use --max to increase.");
            }
        }
    }

    if let Some(index) = report.halted_at {
        eprintln!("❌ Halted on unsupported instruction at {:#06x}", index * 4);
        std::process::exit(1);
    }
}

#[cfg(feature = "tui")]
fn inspect_program(path: &str) {
    use mips_control::{load_program, run_inspector};

    let program = match load_program(path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("❌ Failed to load program: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_inspector(&program.words) {
        eprintln!("❌ Inspector error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn inspect_program(_path: &str) {
    eprintln!("❌ Built without the `tui` feature");
    std::process::exit(1);
}

fn print_signals(signals: &ControlSignals) {
    for (name, value) in signals.flags() {
        println!("  {:<10} {}", name, value as u8);
    }
    println!("  {:<10} {} ({:?})", "ALUOp", signals.alu_op, signals.alu_op);
    println!("  {:<10} {}", "ALUControl", signals.alu_control);
}

fn print_tables() {
    use mips_control::{control::signal_table, Funct};

    println!("━━━ Main Decode (don't-cares pinned to 0) ━━━");
    println!("class   opcode  RegDst ALUSrc MemToReg RegWrite MemRead MemWrite Branch Jump ALUOp");
    for (class, m) in signal_table() {
        println!(
            "{:<7} {:#04x}    {:<6} {:<6} {:<8} {:<8} {:<7} {:<8} {:<6} {:<4} {}",
            class.name(),
            class.opcode(),
            m.reg_dst as u8,
            m.alu_src as u8,
            m.mem_to_reg as u8,
            m.reg_write as u8,
            m.mem_read as u8,
            m.mem_write as u8,
            m.branch as u8,
            m.jump as u8,
            m.alu_op,
        );
    }
    println!();
    println!("━━━ ALU Control (ALUOp = 10) ━━━");
    println!("funct  name  ALUControl");
    for funct in Funct::ALL {
        println!("{:#04x}   {:<5} {}", funct.code(), funct.name(), funct.alu_control());
    }
    println!("ALUOp 00 → add(0010), ALUOp 01 → sub(0110), funct ignored");
}

fn holds(result: Result<ControlSignals, ControlError>, f: impl Fn(&ControlSignals) -> bool) -> bool {
    result.map(|s| f(&s)).unwrap_or(false)
}

fn run_self_test() {
    use mips_control::{decode_fields, AluControl};

    println!("━━━ Control Unit Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    let mut check = |name: &str, ok: bool| {
        print!("{}... ", name);
        if ok {
            println!("✓");
            passed += 1;
        } else {
            println!("✗");
            failed += 1;
        }
    };

    check("R-type add", holds(decode_fields(0x00, 0x20), |s| {
        s.reg_dst && !s.alu_src && s.reg_write && !s.mem_write && !s.branch
            && s.alu_control == AluControl::Add
    }));
    check("Load word", holds(decode_fields(0x23, 0), |s| {
        !s.reg_dst && s.alu_src && s.mem_to_reg && s.reg_write && s.mem_read
            && !s.mem_write && !s.branch && s.alu_control == AluControl::Add
    }));
    check("Store word", holds(decode_fields(0x2B, 0), |s| {
        s.alu_src && !s.reg_write && s.mem_write && !s.mem_read && !s.branch
            && s.alu_control == AluControl::Add
    }));
    check("Branch equal", holds(decode_fields(0x04, 0), |s| {
        !s.alu_src && !s.reg_write && !s.mem_write && s.branch
            && s.alu_control == AluControl::Subtract
    }));
    check(
        "Unsupported opcode",
        decode_fields(0x3F, 0) == Err(ControlError::UnsupportedOpcode(0x3F)),
    );
    check(
        "Unsupported function code",
        decode_fields(0x00, 0x3F) == Err(ControlError::UnsupportedFunctionCode(0x3F)),
    );

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
