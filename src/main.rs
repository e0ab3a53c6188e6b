/* Three-phase harmonic dashboard - compose per-phase harmonic currents and
watch the neutral conductor current they add up to.
Runs interactively in the terminal, or replays a script with --batch.
*/

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};

use triphase::controls::DashboardConfig;
use triphase::engine::{Engine, Event, Frame, Phase};
use triphase::script::Script;
use triphase::utils::init_logger;
use triphase::visualization::{plot_trace, trace_header};

#[cfg(feature = "analysis")]
use triphase::analysis::HarmonicSpectrum;

#[derive(Parser, Debug)]
#[command(name = "triphase", about = "Harmonic current through the neutral conductor")]
struct Args {
    /// Replay this script before showing the dashboard
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print the final plots and exit instead of entering the interactive view
    #[arg(long)]
    batch: bool,

    /// Write the final traces as WAV files into this directory
    #[cfg(feature = "bounce")]
    #[arg(long)]
    export: Option<PathBuf>,

    /// Number of periods per exported WAV file
    #[cfg(feature = "bounce")]
    #[arg(long, default_value_t = 50)]
    periods: usize,

    /// Plot width in characters
    #[arg(long, default_value_t = 72)]
    width: usize,

    /// Plot height in rows
    #[arg(long, default_value_t = 7)]
    height: usize,

    #[arg(long)]
    order_a: Option<i32>,
    #[arg(long)]
    amp_a: Option<f64>,
    #[arg(long)]
    shift_a: Option<f64>,
    #[arg(long)]
    order_b: Option<i32>,
    #[arg(long)]
    amp_b: Option<f64>,
    #[arg(long)]
    shift_b: Option<f64>,
    #[arg(long)]
    order_c: Option<i32>,
    #[arg(long)]
    amp_c: Option<f64>,
    #[arg(long)]
    shift_c: Option<f64>,
}

impl Args {
    fn config(&self) -> DashboardConfig {
        let mut config = DashboardConfig::default();
        let overrides = [
            (Phase::A, self.order_a, self.amp_a, self.shift_a),
            (Phase::B, self.order_b, self.amp_b, self.shift_b),
            (Phase::C, self.order_c, self.amp_c, self.shift_c),
        ];
        for (phase, order, amplitude, shift) in overrides {
            let controls = config.controls_mut(phase);
            if let Some(order) = order {
                controls.set_order(order);
            }
            if let Some(amplitude) = amplitude {
                controls.amplitude = amplitude;
            }
            if let Some(shift) = shift {
                controls.phase_shift_degrees = shift;
            }
        }
        config
    }
}

// Editable form fields for the UI
struct FieldInfo {
    name: &'static str,
    coarse_step: f64,
    fine_step: f64,
}

const FIELD_INFO: [FieldInfo; 3] = [
    FieldInfo { name: "order", coarse_step: 1.0, fine_step: 1.0 },
    FieldInfo { name: "amplitude", coarse_step: 0.1, fine_step: 0.01 },
    FieldInfo { name: "shift", coarse_step: 10.0, fine_step: 1.0 },
];

fn adjust_field(config: &mut DashboardConfig, phase: Phase, field: usize, delta: f64) {
    let controls = config.controls_mut(phase);
    match field {
        0 => {
            let order = controls.order + delta.round() as i32;
            controls.set_order(order);
        }
        1 => controls.amplitude += delta,
        2 => controls.phase_shift_degrees += delta,
        _ => {}
    }
}

// Plots and spectrum for a frame, one entry per output line
fn frame_lines(frame: &Frame, width: usize, height: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for trace in frame.traces() {
        lines.push(trace_header(trace));
        lines.extend(plot_trace(trace, width, height));
        lines.push(String::new());
    }

    #[cfg(feature = "analysis")]
    {
        let spectrum = HarmonicSpectrum::analyze(&frame.neutral.values());
        let orders = spectrum.dominant_orders(1e-6);
        if orders.is_empty() {
            lines.push("Neutral harmonics: none".to_string());
        } else {
            let listed: Vec<String> = orders
                .iter()
                .map(|(order, amplitude)| format!("h{}={:.3}", order, amplitude))
                .collect();
            lines.push(format!("Neutral harmonics: {}", listed.join(" ")));
        }
    }

    lines
}

fn render_display(
    frame: &Frame,
    engine: &Engine,
    config: &DashboardConfig,
    selected_phase: Phase,
    selected_field: usize,
    args: &Args,
) {
    // Clear screen, move cursor to home, and disable line wrapping
    print!("\x1b[2J\x1b[H\x1b[?7l");

    print!("=== Harmonic current through neutral conductor ===\r\n");
    print!("1/2/3=phase ↑↓=field ←→=adj []=fine G=generate R=restart Q=quit\r\n");
    print!("\r\n");

    for phase in Phase::ALL {
        let controls = config.controls(phase);
        let indicator = if phase == selected_phase { ">" } else { " " };
        let mut row = format!("{} Phase {} ", indicator, phase);
        let values = [
            controls.order.to_string(),
            format!("{:.2}", controls.amplitude),
            format!("{:.1}°", controls.phase_shift_degrees),
        ];
        for (i, (info, value)) in FIELD_INFO.iter().zip(values).enumerate() {
            let marker = if phase == selected_phase && i == selected_field { "*" } else { " " };
            row.push_str(&format!(" {}{}: {:<8}", marker, info.name, value));
        }
        row.push_str(&format!(" [{} components]", engine.phase(phase).len()));
        print!("{}\r\n", row);
    }
    print!("\r\n");

    for line in frame_lines(frame, args.width, args.height) {
        print!("{}\r\n", line);
    }

    // Flush to ensure display updates
    io::stdout().flush().ok();
}

fn run_interactive(engine: &mut Engine, mut config: DashboardConfig, args: &Args) -> anyhow::Result<Frame> {
    let mut frame = engine.frame();
    let mut selected_phase = Phase::A;
    let mut selected_field: usize = 0;
    let mut needs_redraw = true;

    execute!(io::stdout(), Clear(ClearType::All), cursor::Hide)?;
    enable_raw_mode()?;

    let result: anyhow::Result<Frame> = loop {
        if needs_redraw {
            render_display(&frame, engine, &config, selected_phase, selected_field, args);
            needs_redraw = false;
        }

        let key = match event::read() {
            Ok(TermEvent::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => code,
            Ok(TermEvent::Resize(..)) => {
                needs_redraw = true;
                continue;
            }
            Ok(_) => continue,
            Err(e) => break Err(e.into()),
        };

        match key {
            KeyCode::Char('1') => selected_phase = Phase::A,
            KeyCode::Char('2') => selected_phase = Phase::B,
            KeyCode::Char('3') => selected_phase = Phase::C,

            KeyCode::Up => selected_field = selected_field.saturating_sub(1),
            KeyCode::Down => selected_field = (selected_field + 1).min(FIELD_INFO.len() - 1),

            KeyCode::Left => {
                let step = FIELD_INFO[selected_field].coarse_step;
                adjust_field(&mut config, selected_phase, selected_field, -step);
            }
            KeyCode::Right => {
                let step = FIELD_INFO[selected_field].coarse_step;
                adjust_field(&mut config, selected_phase, selected_field, step);
            }
            KeyCode::Char('[') => {
                let step = FIELD_INFO[selected_field].fine_step;
                adjust_field(&mut config, selected_phase, selected_field, -step);
            }
            KeyCode::Char(']') => {
                let step = FIELD_INFO[selected_field].fine_step;
                adjust_field(&mut config, selected_phase, selected_field, step);
            }

            KeyCode::Char('g') | KeyCode::Char('G') | KeyCode::Char(' ') => {
                let event = config.controls(selected_phase).generate_event(selected_phase);
                frame = engine.handle(event);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                frame = engine.handle(Event::Restart);
            }

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break Ok(frame),
            _ => continue,
        }
        needs_redraw = true;
    };

    // Restore terminal to normal mode and re-enable line wrapping
    print!("\x1b[?7h");
    execute!(io::stdout(), cursor::Show)?;
    disable_raw_mode()?;

    result
}

fn main() -> anyhow::Result<()> {
    init_logger();
    let args = Args::parse();

    let mut config = args.config();
    let mut engine = Engine::new();
    let mut frame = engine.frame();

    if let Some(path) = &args.script {
        let source = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
        let script = Script::parse_with(&source, config)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        log::info!("replaying {} steps from {}", script.steps().len(), path.display());

        if let Some(last) = script.run(&mut engine).pop() {
            frame = last;
        }
        config = script.config().clone();
    }

    let frame = if args.batch {
        for line in frame_lines(&frame, args.width, args.height) {
            println!("{}", line);
        }
        frame
    } else {
        run_interactive(&mut engine, config, &args)?
    };

    #[cfg(feature = "bounce")]
    if let Some(dir) = &args.export {
        let written = triphase::bounce::export_frame(dir, &frame, engine.grid(), args.periods)?;
        println!("Exported {} files to {}", written.len(), dir.display());
    }

    Ok(())
}
