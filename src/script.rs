//! A tiny, line-based language for replaying dashboard sessions.
//!
//! Each line is one invocation of the input layer: one or more triggers,
//! joined with `+` when they fire together. `#` starts a comment.
//!
//! Example:
//! ```text
//! set b shift=110          # edit the form without pressing anything
//! gen a 1 1.0 0            # gen <phase> [order] [amplitude] [shift]
//! gen b order=3 amp=0.5
//! c 5 0.2                  # shorthand for 'gen c 5 0.2'
//! restart + gen a          # a restart swallows the generate beside it
//! ```
//!
//! Arguments left out fall back to the current form values of that phase.

use crate::controls::{DashboardConfig, MIN_ORDER};
use crate::engine::{Engine, Event, Frame, Phase};

#[derive(Clone, Debug)]
pub struct Script {
    steps: Vec<Vec<Event>>,
    config: DashboardConfig,
}

impl Script {
    pub fn parse(source: &str) -> Result<Self, String> {
        Self::parse_with(source, DashboardConfig::default())
    }

    /// Parse starting from existing form values
    pub fn parse_with(source: &str, config: DashboardConfig) -> Result<Self, String> {
        let mut script = Self {
            steps: Vec::new(),
            config,
        };

        for (line_index, raw_line) in source.lines().enumerate() {
            let line_number = line_index + 1;
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            let mut step = Vec::new();
            let clauses: Vec<&str> = line.split('+').map(str::trim).collect();

            for clause in &clauses {
                let tokens: Vec<&str> = clause.split_whitespace().collect();
                if tokens.is_empty() {
                    return Err(format!("line {}: empty trigger around '+'", line_number));
                }

                let cmd = tokens[0].to_ascii_lowercase();
                match cmd.as_str() {
                    "restart" | "reset" | "r" => {
                        if tokens.len() > 1 {
                            return Err(format!(
                                "line {}: restart takes no arguments",
                                line_number
                            ));
                        }
                        step.push(Event::Restart);
                    }
                    "gen" | "generate" | "g" => {
                        let phase = tokens.get(1).copied().ok_or_else(|| {
                            format!("line {}: gen expects: gen <phase> [...]", line_number)
                        })?;
                        let phase = parse_phase(line_number, phase)?;
                        script.apply_args(line_number, phase, &tokens[2..])?;
                        step.push(script.config.controls(phase).generate_event(phase));
                    }
                    "set" => {
                        if clauses.len() > 1 {
                            return Err(format!(
                                "line {}: set cannot be combined with triggers",
                                line_number
                            ));
                        }
                        let phase = tokens.get(1).copied().ok_or_else(|| {
                            format!("line {}: set expects: set <phase> key=value ...", line_number)
                        })?;
                        let phase = parse_phase(line_number, phase)?;
                        if tokens.len() < 3 {
                            return Err(format!(
                                "line {}: set expects at least one value",
                                line_number
                            ));
                        }
                        script.apply_args(line_number, phase, &tokens[2..])?;
                    }
                    other => match Phase::parse(other) {
                        Some(phase) => {
                            script.apply_args(line_number, phase, &tokens[1..])?;
                            step.push(script.config.controls(phase).generate_event(phase));
                        }
                        None => {
                            return Err(format!(
                                "line {}: unknown statement '{}'",
                                line_number, other
                            ));
                        }
                    },
                }
            }

            if !step.is_empty() {
                script.steps.push(step);
            }
        }

        Ok(script)
    }

    /// Update the form values of `phase` from positional or `key=value` args
    fn apply_args(&mut self, line_number: usize, phase: Phase, args: &[&str]) -> Result<(), String> {
        let controls = self.config.controls_mut(phase);
        let mut position = 0;

        for arg in args {
            let (key, value) = match arg.split_once('=') {
                Some((key, value)) => (key.to_ascii_lowercase(), value),
                None => {
                    let key = match position {
                        0 => "order",
                        1 => "amp",
                        2 => "shift",
                        _ => {
                            return Err(format!(
                                "line {}: too many arguments (unexpected '{}')",
                                line_number, arg
                            ));
                        }
                    };
                    position += 1;
                    (key.to_string(), *arg)
                }
            };

            match key.as_str() {
                "order" | "o" => controls.order = parse_order(line_number, value)?,
                "amp" | "amplitude" | "a" => {
                    controls.amplitude = parse_f64(line_number, "amplitude", value)?
                }
                "shift" | "phase" | "s" => {
                    controls.phase_shift_degrees = parse_f64(line_number, "phase shift", value)?
                }
                other => {
                    return Err(format!(
                        "line {}: unknown argument '{}'",
                        line_number, other
                    ));
                }
            }
        }

        Ok(())
    }

    /// Trigger batches in script order
    pub fn steps(&self) -> &[Vec<Event>] {
        &self.steps
    }

    /// Form values after the last line
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Feed every batch through `engine`, returning the frame after each
    pub fn run(&self, engine: &mut Engine) -> Vec<Frame> {
        self.steps
            .iter()
            .map(|step| engine.handle_simultaneous(step.iter().copied()))
            .collect()
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map(|(head, _)| head).unwrap_or(line)
}

fn parse_phase(line_number: usize, token: &str) -> Result<Phase, String> {
    Phase::parse(token).ok_or_else(|| {
        format!(
            "line {}: unknown phase '{}', expected a, b or c",
            line_number, token
        )
    })
}

fn parse_order(line_number: usize, token: &str) -> Result<i32, String> {
    let order = token.parse::<i32>().map_err(|_| {
        format!(
            "line {}: expected an integer for order, got '{}'",
            line_number, token
        )
    })?;
    if order < MIN_ORDER {
        return Err(format!(
            "line {}: order must be at least {}, got {}",
            line_number, MIN_ORDER, order
        ));
    }
    Ok(order)
}

fn parse_f64(line_number: usize, what: &str, token: &str) -> Result<f64, String> {
    token.parse::<f64>().map_err(|_| {
        format!(
            "line {}: expected a number for {}, got '{}'",
            line_number, what, token
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_and_named_arguments() {
        let script = Script::parse("gen a 3 0.5 10\ngen b amp=2 order=5").expect("parse");
        assert_eq!(
            script.steps(),
            &[
                vec![Event::generate(Phase::A, 3, 0.5, 10.0)],
                vec![Event::generate(Phase::B, 5, 2.0, 120.0)],
            ]
        );
    }

    #[test]
    fn test_missing_arguments_use_form_values() {
        let script = Script::parse("set c amp=0.4\nc\nc 3").expect("parse");
        assert_eq!(
            script.steps(),
            &[
                vec![Event::generate(Phase::C, 1, 0.4, 240.0)],
                vec![Event::generate(Phase::C, 3, 0.4, 240.0)],
            ]
        );
        assert_eq!(script.config().controls(Phase::C).order, 3);
    }

    #[test]
    fn test_joined_triggers_share_a_step() {
        let script = Script::parse("restart + gen a 2   # together").expect("parse");
        assert_eq!(script.steps().len(), 1);
        assert_eq!(
            script.steps()[0],
            vec![Event::Restart, Event::generate(Phase::A, 2, 1.0, 0.0)]
        );
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let script = Script::parse("# header\n\n   \nrestart\n").expect("parse");
        assert_eq!(script.steps(), &[vec![Event::Restart]]);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = Script::parse("gen a\ngen d 1").unwrap_err();
        assert!(err.starts_with("line 2:"), "{}", err);

        let err = Script::parse("gen a 0").unwrap_err();
        assert!(err.contains("order must be at least 1"), "{}", err);

        let err = Script::parse("gen a 1 x").unwrap_err();
        assert!(err.contains("amplitude"), "{}", err);

        let err = Script::parse("gen a 1 1 0 9").unwrap_err();
        assert!(err.contains("too many arguments"), "{}", err);

        let err = Script::parse("set a amp=1 + gen b").unwrap_err();
        assert!(err.contains("cannot be combined"), "{}", err);

        let err = Script::parse("bogus").unwrap_err();
        assert!(err.contains("unknown statement 'bogus'"), "{}", err);
    }

    #[test]
    fn test_run_returns_frame_per_step() {
        let script = Script::parse("gen a\ngen b\ngen c").expect("parse");
        let mut engine = Engine::new();
        let frames = script.run(&mut engine);

        assert_eq!(frames.len(), 3);
        let last = frames.last().unwrap();
        assert!(last.neutral.peak() < 1e-9);
        assert!(frames[0].neutral.peak() > 0.99);
    }
}
