use clap::Parser;
use std::collections::HashMap;
use std::io::{self, BufRead, Write as _};
use std::time::Instant;
use std::{fs, process};

use bytecode::event::parse_events;
use vm::{LoopbackTransport, Platform, Vm, VmConfig};

/// Host-side Brief simulator: feeds wire frames to a VM wired to a mock
/// board and prints the events that come back.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Frame files to feed in order, one hex frame per line
    files: Vec<String>,

    /// Extra loop ticks to run after all frames are fed
    #[arg(long, default_value_t = 0)]
    ticks: u32,

    /// Start an interactive session after file execution
    #[arg(long)]
    repl: bool,

    /// Dictionary size in bytes
    #[arg(long, default_value_t = 512)]
    mem: usize,
}

/// A pretend board: pins are a map, time is real, nothing ever interrupts.
#[derive(Debug, Default)]
struct SimPlatform {
    pins: HashMap<i16, i16>,
    started: Option<Instant>,
}

impl SimPlatform {
    fn elapsed_millis(&mut self) -> i16 {
        let started = self.started.get_or_insert_with(Instant::now);
        started.elapsed().as_millis() as i16
    }
}

impl Platform for SimPlatform {
    fn pin_mode(&mut self, pin: i16, mode: i16) {
        tracing::info!(pin, mode, "pinMode");
    }
    fn digital_read(&mut self, pin: i16) -> bool {
        self.pins.get(&pin).is_some_and(|&v| v != 0)
    }
    fn digital_write(&mut self, pin: i16, high: bool) {
        tracing::info!(pin, high, "digitalWrite");
        self.pins.insert(pin, high as i16);
    }
    fn analog_read(&mut self, pin: i16) -> i16 {
        self.pins.get(&pin).copied().unwrap_or(0)
    }
    fn analog_write(&mut self, pin: i16, value: i16) {
        tracing::info!(pin, value, "analogWrite");
        self.pins.insert(pin, value);
    }

    fn milliseconds(&mut self) -> i16 {
        self.elapsed_millis()
    }
    fn pulse_in(&mut self, _pin: i16, _level: i16) -> i16 {
        0
    }

    fn attach_interrupt(&mut self, line: u8, mode: i16) {
        tracing::info!(line, mode, "attachInterrupt");
    }
    fn detach_interrupt(&mut self, line: u8) {
        tracing::info!(line, "detachInterrupt");
    }
    fn poll_interrupt(&mut self) -> Option<u8> {
        None
    }

    fn wire_begin(&mut self) {}
    fn wire_request_from(&mut self, _address: i16, _count: i16) {}
    fn wire_available(&mut self) -> i16 {
        0
    }
    fn wire_read(&mut self) -> i16 {
        0
    }
    fn wire_begin_transmission(&mut self, _address: i16) {}
    fn wire_write(&mut self, value: u8) {
        tracing::info!(value, "wireWrite");
    }
    fn wire_end_transmission(&mut self) {}
    fn poll_wire_receive(&mut self) -> Option<i16> {
        None
    }
    fn poll_wire_request(&mut self) -> bool {
        false
    }

    fn servo_attach(&mut self, pin: i16) {
        tracing::info!(pin, "servoAttach");
    }
    fn servo_detach(&mut self, pin: i16) {
        tracing::info!(pin, "servoDetach");
    }
    fn servo_write_micros(&mut self, pin: i16, micros: i16) {
        tracing::info!(pin, micros, "servoWriteMicros");
    }
}

type SimVm = Vm<SimPlatform, LoopbackTransport>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = VmConfig {
        mem_size: cli.mem,
        ..VmConfig::default()
    };
    let mut vm = SimVm::new(config, SimPlatform::default(), LoopbackTransport::new());
    print_events(&mut vm);

    for filename in &cli.files {
        let source = match fs::read_to_string(filename) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("Error reading file '{filename}': {err}");
                process::exit(1);
            }
        };
        for line in source.lines() {
            feed_line(&mut vm, line);
        }
    }

    for _ in 0..cli.ticks {
        vm.tick();
        print_events(&mut vm);
    }

    if cli.repl || cli.files.is_empty() {
        run_repl(&mut vm);
    }
}

fn run_repl(vm: &mut SimVm) {
    println!("Brief simulator");
    println!("Enter frames as hex bytes (header first); 'tick' runs one loop pass, 'exit' quits.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = String::new();

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            break;
        }
        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {
                let line = input.trim();
                match line {
                    "exit" => break,
                    "" => continue,
                    "tick" => {
                        vm.tick();
                        print_events(vm);
                    }
                    _ => feed_line(vm, line),
                }
            }
            Err(err) => {
                eprintln!("Error reading input: {err}");
                break;
            }
        }
    }
}

/// One line is one frame: whitespace-separated hex bytes, header included.
fn feed_line(vm: &mut SimVm, line: &str) {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return;
    }
    let bytes: Result<Vec<u8>, _> = line
        .split_whitespace()
        .map(|tok| u8::from_str_radix(tok, 16))
        .collect();
    match bytes {
        Ok(frame) => {
            vm.transport.feed(&frame);
            vm.tick();
            print_events(vm);
        }
        Err(err) => eprintln!("bad frame '{line}': {err}"),
    }
}

fn print_events(vm: &mut SimVm) {
    for event in parse_events(&vm.transport.drain()) {
        println!(
            "event id=0x{:02X} value={} body={:02X?}",
            event.id,
            event.value(),
            event.body
        );
    }
}
