/// One line of protocol input, tokenized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    /// Full token list, starting with `position`
    Position(Vec<String>),
    Go { depth: Option<u32> },
    Stop,
    Perft(usize),
    /// `d`: print the current board
    Display,
    SetOption { name: String, value: Option<String> },
    Quit,
    Unknown(String),
}

/// Parse `setoption name <id...> [value <x...>]`; names may contain spaces
fn parse_setoption(parts: &[&str]) -> UciCommand {
    let value_at = parts.iter().position(|p| *p == "value");
    let name_end = value_at.unwrap_or(parts.len());
    let name_start = parts
        .iter()
        .position(|p| *p == "name")
        .map_or(1, |i| i + 1)
        .min(name_end);
    let name = parts[name_start..name_end].join(" ");
    let value = value_at.map(|i| parts[i + 1..].join(" "));
    UciCommand::SetOption { name, value }
}

pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let trimmed = line.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    if parts.is_empty() {
        return None;
    }

    let owned_parts = || parts.iter().map(|p| (*p).to_string()).collect::<Vec<String>>();

    let cmd = match parts[0] {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(owned_parts()),
        "go" => {
            let depth = parts
                .iter()
                .position(|p| *p == "depth")
                .and_then(|i| parts.get(i + 1))
                .and_then(|v| v.parse::<u32>().ok());
            UciCommand::Go { depth }
        }
        "stop" => UciCommand::Stop,
        "perft" => {
            let depth = parts.get(1).and_then(|v| v.parse::<usize>().ok()).unwrap_or(1);
            UciCommand::Perft(depth)
        }
        "d" => UciCommand::Display,
        "setoption" => parse_setoption(&parts),
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(trimmed.to_string()),
    };

    Some(cmd)
}
