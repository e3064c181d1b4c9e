use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use infix_derivative::interpreter::config::{
    DifferentiationConfig, UnsupportedPowerPolicy, DEFAULT_MAX_DEPTH, DEFAULT_VARIABLE,
};
use infix_derivative::interpreter::differentiator::find_derivative;
use infix_derivative::interpreter::{convert_with_limit, postfix_to_string, render, to_postfix};
use log::info;

/// Differentiates the given expression
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to differentiate
    #[clap(default_value = "a^x")]
    expression: String,

    /// The variable to differentiate with respect to
    #[clap(short = 'r', long, default_value = DEFAULT_VARIABLE)]
    with_respect_to: String,

    /// Fail on powers other than x^n and a^x instead of treating their derivative as 0
    #[clap(long)]
    strict: bool,

    /// How deeply the expression may nest
    #[clap(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print the expression and its derivative as trees
    #[clap(long)]
    tree: bool,

    /// Print the expression in postfix notation
    #[clap(long)]
    postfix: bool,

    #[clap(flatten)]
    verbose: Verbosity,
}

impl Arguments {
    fn config(&self) -> DifferentiationConfig {
        let unsupported_powers = if self.strict {
            UnsupportedPowerPolicy::Reject
        } else {
            UnsupportedPowerPolicy::Zero
        };
        DifferentiationConfig {
            with_respect_to: self.with_respect_to.clone(),
            unsupported_powers,
            max_depth: self.max_depth,
        }
    }
}

fn main() -> Result<()> {
    let arguments = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(arguments.verbose.log_level_filter())
        .init();

    let config = arguments.config();
    config.validate()?;
    info!(
        "Differentiating {} with respect to {}",
        arguments.expression, config.with_respect_to
    );

    if arguments.postfix {
        let postfix = to_postfix(arguments.expression.clone(), config.max_depth)?;
        println!("{}", postfix_to_string(&postfix));
    }

    let tree = convert_with_limit(arguments.expression.clone(), config.max_depth)?;
    let derivative = find_derivative(&tree, &config)?;

    if arguments.tree {
        print!("{}", tree);
        print!("{}", derivative);
    }

    println!("{}", render(&derivative)?);
    Ok(())
}
