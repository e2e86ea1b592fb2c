use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Kind {
    Nfa,
    #[default]
    Dfa,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Format {
    /// Round-trippable plain-text format
    #[default]
    Text,
    /// Sorted listing for inspection
    Render,
}

#[derive(Parser)]
#[command(name = "refa", bin_name = "refa")]
#[command(about = "Regular expressions and finite automata: build, convert, minimize, match")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the postfix form of an expression
    Postfix {
        #[command(flatten)]
        expr: ExprArgs,
    },

    /// Build the Thompson NFA of an expression
    #[command(after_help = r#"EXAMPLES:
  refa nfa 'a(b|c)*'
  refa nfa @expr.txt --prune --format render"#)]
    Nfa {
        #[command(flatten)]
        expr: ExprArgs,

        /// Remove epsilon transitions
        #[arg(long)]
        no_epsilon: bool,

        /// Remove unreachable and dead states (implies --no-epsilon)
        #[arg(long)]
        prune: bool,

        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },

    /// Determinize the NFA of an expression
    #[command(after_help = r#"EXAMPLES:
  refa dfa '(a|b)*ab' --minimize
  refa dfa 'ab' --complement --format render"#)]
    Dfa {
        #[command(flatten)]
        expr: ExprArgs,

        #[command(flatten)]
        transform: DfaArgs,

        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },

    /// Run inputs through the DFA of an expression
    Match {
        #[command(flatten)]
        expr: ExprArgs,

        /// Strings to test
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<String>,

        #[command(flatten)]
        transform: DfaArgs,
    },

    /// Convert an automaton text file back into an expression
    Regex {
        /// Automaton in the plain-text format
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Kind of automaton stored in the file
        #[arg(short = 'k', long, value_enum, default_value_t)]
        kind: Kind,
    },

    /// Print the automaton of an expression as a Graphviz graph
    Dot {
        #[command(flatten)]
        expr: ExprArgs,

        #[arg(short = 'k', long, value_enum, default_value_t)]
        kind: Kind,

        #[command(flatten)]
        transform: DfaArgs,
    },

    /// Print the minimized transition table of an expression as JSON
    Table {
        #[command(flatten)]
        expr: ExprArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Args)]
pub struct ExprArgs {
    /// Expression text, a file holding it, or @FILE
    #[arg(value_name = "EXPR")]
    pub source: String,
}

#[derive(Args, Clone, Copy)]
pub struct DfaArgs {
    /// Minimize the DFA
    #[arg(short = 'm', long)]
    pub minimize: bool,

    /// Complement the DFA over its alphabet
    #[arg(short = 'c', long)]
    pub complement: bool,

    /// Add a trap state so that every transition is defined
    #[arg(long)]
    pub complete: bool,
}
