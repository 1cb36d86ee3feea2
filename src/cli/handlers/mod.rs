use log::debug;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{config_io, task_io};
use crate::model::config::Config;
use crate::ops::board::Board;
use crate::ops::hierarchy;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config = config_io::load_config(cli.config.as_deref())?;
    debug!("config: {:?}", config);

    match cli.command {
        Commands::Tree(args) => cmd_tree(args, &config, json),
        Commands::Layout(args) => cmd_layout(args, &config, json),
        Commands::Mv(args) => cmd_mv(args, &config, json),
        Commands::Search(args) => cmd_search(args, &config, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_board(
    file: &std::path::Path,
    config: &Config,
    show_done: bool,
) -> Result<Board, Box<dyn std::error::Error>> {
    let tasks = task_io::read_tasks(file)?;
    debug!("loaded {} tasks from {}", tasks.len(), file.display());
    let mut config = config.clone();
    config.view.show_done |= show_done;
    Ok(Board::from_config(tasks, &config)?)
}

fn print_placed(board: &Board) {
    for task in board.active() {
        println!("{}", format_placed_line(task));
    }
}

fn placed_json(board: &Board) -> Vec<PlacedTaskJson> {
    board.active().into_iter().map(placed_task_to_json).collect()
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_tree(args: TreeArgs, config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = task_io::read_tasks(&args.file)?;
    let tree = hierarchy::build_with_label(&tasks, &config.view.root_label);

    if json {
        println!("{}", serde_json::to_string_pretty(&tree_to_json(&tree, &tasks))?);
    } else {
        for line in format_tree(&tree, &tasks) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_layout(args: LayoutArgs, config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let board = load_board(&args.file, config, args.show_done)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&placed_json(&board))?);
    } else {
        print_placed(&board);
    }
    Ok(())
}

fn cmd_mv(args: MvArgs, config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = load_board(&args.file, config, args.show_done)?;
    let changed = board.move_to(&args.key, args.ord)?;

    if json {
        let out = MoveJson {
            changed,
            tasks: placed_json(&board),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        if changed.is_empty() {
            println!("{} already at rank {}", args.key, args.ord);
        } else {
            println!("Moved {} to rank {} (changed: {})", args.key, args.ord, changed.join(", "));
        }
        print_placed(&board);
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let board = load_board(&args.file, config, args.show_done)?;
    let keys = board.filter(&args.query.join(" "));

    if json {
        println!("{}", serde_json::to_string_pretty(&keys)?);
    } else {
        for key in keys {
            let title = board.task(key).map(|t| t.title.as_str()).unwrap_or("");
            println!("{}  {}", key, title);
        }
    }
    Ok(())
}
