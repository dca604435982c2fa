use clap::{Parser, ValueEnum};

use crate::clustering::{InitStrategy, Strategy};

#[derive(Parser, Debug)]
#[command(version)]
pub struct ProgramArguments {
    #[arg(short, long, help = "instance file path")]
    pub input: String,

    #[arg(
        short,
        long,
        help = "solution file path (defaults to standard output)"
    )]
    pub output: Option<String>,

    #[arg(long, value_enum, default_value = "parallel", help = "clustering heuristic")]
    pub strategy: StrategyArg,

    #[arg(
        long,
        value_enum,
        default_value = "none",
        help = "cluster initialisation policy"
    )]
    pub init: InitArg,

    #[arg(
        long,
        default_value = "1.0",
        value_parser = parse_regret_coeff,
        help = "weight of the regret term in the evaluation function"
    )]
    pub regret_coeff: f64,
}

fn parse_regret_coeff(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{}", e))?;
    if value < 0.0 {
        return Err("the regret coefficient must be non-negative".to_string());
    }
    Ok(value)
}

#[derive(Clone, ValueEnum, Debug)]
pub enum StrategyArg {
    Parallel,
    Sequential,
}

#[derive(Clone, ValueEnum, Debug)]
pub enum InitArg {
    None,
    HigherAmount,
    Nearest,
}

impl ProgramArguments {
    pub(crate) fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyArg::Parallel => Strategy::Parallel,
            StrategyArg::Sequential => Strategy::Sequential,
        }
    }

    pub(crate) fn init(&self) -> InitStrategy {
        match self.init {
            InitArg::None => InitStrategy::None,
            InitArg::HigherAmount => InitStrategy::HigherAmount,
            InitArg::Nearest => InitStrategy::Nearest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        ProgramArguments::command().debug_assert()
    }

    #[test]
    fn negative_regret_coefficient_is_rejected() {
        assert!(parse_regret_coeff("1.5").is_ok());
        assert!(parse_regret_coeff("-0.1").is_err());
    }
}
