use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use clap::Parser;

use tinyhouse::config::Config;
use tinyhouse::core::board::{Board, SIZE};
use tinyhouse::core::mv::Move;
use tinyhouse::core::piece::{self, Side};
use tinyhouse::rules::apply::do_move;
use tinyhouse::rules::movegen::Rules;
use tinyhouse::search::engine::{self, Solution};
use tinyhouse::search::line::principal_variation;
use tinyhouse::search::trace::Trace;

/// Exhaustive solver for the tinyhouse 4×4 chess variant.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Initial position: four comma-separated 4-character rows.
    #[arg(long, default_value = "")]
    board: String,

    /// Depth cutoff; negative means unlimited.
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    max_depth: i32,

    /// Inter-frame pause of the animated trace, in milliseconds.
    #[arg(long, default_value_t = 0)]
    sleep_duration_ms: u64,

    /// Trace nodes down to this depth; 0 keeps only the principal-variation
    /// replay; negative silences trace output.
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    max_print_depth: i32,

    /// Print a counter each time the search reaches a new depth.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    print_depth: bool,

    /// After solving, play against the solution.
    #[arg(long)]
    enable_play: bool,

    /// Enable pawn promotion in move generation.
    #[arg(long)]
    enable_promotion: bool,

    /// Enable captured-piece drops in move generation.
    #[arg(long)]
    enable_drop: bool,

    /// Number of workers sharing the transposition tables.
    #[arg(long, default_value_t = 1)]
    num_solvers: usize,

    /// Solve the built-in suite of configurations in parallel.
    #[arg(long)]
    run_all: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            board: self.board.clone(),
            max_depth: self.max_depth,
            sleep_duration: Duration::from_millis(self.sleep_duration_ms),
            max_print_depth: self.max_print_depth,
            print_depth: self.print_depth,
            enable_promotion: self.enable_promotion,
            enable_drop: self.enable_drop,
            num_solvers: self.num_solvers.max(1),
            ..Config::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.run_all {
        run_all();
        return;
    }

    let config = cli.config();
    let solution = match engine::run(&config, io::stdout()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("solve failed: {e}");
            std::process::exit(1);
        }
    };

    let mut trace = Trace::new(io::stdout(), &config);
    principal_variation(&solution.table, &solution.root, solution.value, &mut trace);
    trace.summary(solution.value);

    if cli.enable_play {
        play(&solution, Rules::new(cli.enable_promotion, cli.enable_drop));
    }
}

/// The fixed suite solved by `--run-all`. Output blocks are printed in
/// submission order regardless of completion order.
fn run_all() {
    struct Entry {
        board: &'static str,
        promotion: bool,
        drop: bool,
    }

    let suite = [
        Entry {
            board: "   k,    ,P   ,KR  ",
            promotion: true,
            drop: false,
        },
        Entry {
            board: "   k,    ,P   ,KR  ",
            promotion: false,
            drop: true,
        },
        Entry {
            board: "   k,    ,P   ,KR  ",
            promotion: true,
            drop: true,
        },
        Entry {
            board: "   k,    ,P   ,KRNB",
            promotion: false,
            drop: false,
        },
        Entry {
            board: "   k,   p,P   ,KRNB",
            promotion: false,
            drop: false,
        },
    ];

    let configs: Vec<Config> = suite
        .iter()
        .map(|e| Config {
            board: e.board.to_string(),
            enable_promotion: e.promotion,
            enable_drop: e.drop,
            max_print_depth: -1,
            print_depth: false,
            ..Config::default()
        })
        .collect();

    let mut blocks: Vec<String> = Vec::new();
    thread::scope(|s| {
        let handles: Vec<_> = configs
            .iter()
            .map(|config| {
                s.spawn(move || {
                    let mut buf: Vec<u8> = Vec::new();
                    match engine::run(config, &mut buf) {
                        Ok(solution) => {
                            let _ = writeln!(buf, "res: {}", solution.value);
                        }
                        Err(e) => {
                            let _ = writeln!(buf, "solve failed: {e}");
                        }
                    }
                    String::from_utf8_lossy(&buf).into_owned()
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(block) => blocks.push(block),
                Err(_) => {
                    eprintln!("worker panicked");
                    std::process::exit(1);
                }
            }
        }
    });

    for (entry, block) in suite.iter().zip(blocks) {
        let mut desc = vec![format!("--board='{}'", entry.board)];
        if entry.promotion {
            desc.push("--enable-promotion".to_string());
        }
        if entry.drop {
            desc.push("--enable-drop".to_string());
        }
        println!("\n{}\n{block}", desc.join(" "));
    }
}

/// Interactive mode: the solver replies with its recorded best move, the
/// user answers with a four-integer move `fr fc tr tc`.
fn play(solution: &Solution, rules: Rules) {
    let mut board = solution.root.clone();
    let mut side = Side::Upper;
    let stdin = io::stdin();

    loop {
        let Some(mv) = solution.table.best(side, &board) else {
            println!("no solved reply here; stopping");
            break;
        };

        print_move(&board, side, mv);
        let captured_king = mv.is_king_capture();
        do_move(&mut board, side, mv);
        print_board(&board);
        if captured_king {
            println!("king captured, side {} wins", side.index());
            break;
        }
        side = side.opponent();

        let Some(user) = read_user_move(&stdin, &board, side, rules) else {
            break;
        };
        do_move(&mut board, side, user);
        print_board(&board);
        side = side.opponent();
    }
}

fn read_user_move(stdin: &io::Stdin, board: &Board, side: Side, rules: Rules) -> Option<Move> {
    let legal = rules.moves(board, side);
    if legal.is_empty() {
        println!("stalemate");
        return None;
    }

    loop {
        print!("play\nmove (fr fc tr tc): ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).ok()? == 0 {
            return None;
        }
        let fields: Vec<usize> = line
            .split_whitespace()
            .filter_map(|f| f.parse().ok())
            .collect();
        let &[fr, fc, tr, tc] = fields.as_slice() else {
            println!("expected four integers");
            continue;
        };

        let found = legal.iter().copied().find(|m| {
            m.from_row() == fr && m.from_col() == fc && m.to_row() == tr && m.to_col() == tc
        });
        match found {
            Some(m) => return Some(m),
            None => println!("illegal move"),
        }
    }
}

fn print_move(board: &Board, side: Side, mv: Move) {
    let from = if mv.is_drop() {
        piece::drop_glyph(side, mv.from_col())
    } else {
        board.get(mv.from_row(), mv.from_col())
    };
    let to = board.get(mv.to_row(), mv.to_col());
    println!(
        "\nplay\nturn: {}\nmove: {} ({}, {}) => {} ({}, {})",
        side.index(),
        from as char,
        mv.from_row(),
        mv.from_col(),
        to as char,
        mv.to_row(),
        mv.to_col(),
    );
}

fn print_board(board: &Board) {
    println!("______");
    for r in 0..SIZE {
        let mut row = String::with_capacity(SIZE + 2);
        row.push('|');
        for c in 0..SIZE {
            row.push(board.get(r, c) as char);
        }
        row.push('|');
        println!("{row}");
    }
    println!("\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}\u{203e}");
}
