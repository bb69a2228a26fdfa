use chrono::Local;
use colored::Colorize;
use lotto_ensemble::{CombinedResult, EnsembleCombiner, EnsembleConfig};
use lotto_models::{
    default_sources, format_pick, generate_all, pad_numbers, render_markdown, DataAnalysis,
    DrawSimulator, LatestDraw, Perturbation,
};
use lotto_server::state::request_rng;
use lotto_server::{LottoServer, Prediction, ServerConfig};
use lotto_types::{BiasInput, GameConfig, Zone};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Predict(args) => cmd_predict(args, format),
        Command::Perturb(args) => cmd_perturb(args, format),
        Command::Draw(args) => cmd_draw(args, format),
        Command::Report(args) => cmd_report(args, format),
        Command::Analyze(args) => cmd_analyze(args, format),
        Command::Serve(args) => cmd_serve(args),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_predict(args: PredictArgs, format: OutputFormat) -> anyhow::Result<()> {
    let combiner = EnsembleCombiner::new(EnsembleConfig::default())?;
    let game = combiner.config().game;
    let mut rng = request_rng(args.seed);

    let individual_models = generate_all(&default_sources(), &game, &mut rng);
    let perturbation = args.perturb.then(|| Perturbation::generate(&mut rng));
    let bias = match (args.intensity, args.chaos, args.harmony) {
        (Some(intensity), Some(chaos), Some(harmony)) => {
            Some(BiasInput::new(intensity, chaos, harmony))
        }
        _ => perturbation.as_ref().map(Perturbation::bias),
    };

    let ensemble = combiner.combine(&individual_models, bias.as_ref(), &mut rng)?;
    let prediction = Prediction {
        ensemble,
        individual_models,
        perturbation,
    };
    if format == OutputFormat::Json {
        return print_json(&prediction);
    }

    for model in &prediction.individual_models {
        println!(
            "  {:<12} {}  {}",
            model.source_id.to_string().cyan(),
            format_pick(&model.primary_numbers, &model.secondary_numbers),
            format!("{:.1}%", model.confidence * 100.0).dimmed()
        );
    }
    if let Some(bias) = &bias {
        println!(
            "  {} intensity {:.3}, chaos {:.3}, harmony {:.3}",
            "bias".magenta(),
            bias.intensity,
            bias.chaos,
            bias.harmony
        );
    }
    print_ensemble(&prediction.ensemble);
    Ok(())
}

fn print_ensemble(result: &CombinedResult) {
    println!(
        "{} {}",
        "✓".green().bold(),
        format_pick(&result.primary_numbers, &result.secondary_numbers).bold()
    );
    println!("  Confidence: {}", format!("{:.1}%", result.confidence * 100.0).yellow());
    let weights: Vec<String> = result
        .weights_used
        .iter()
        .map(|(id, w)| format!("{id} {w:.3}"))
        .collect();
    println!("  Weights: {}", weights.join(", "));
    if !result.filled_primary.is_empty() || !result.filled_secondary.is_empty() {
        println!(
            "  Filled: {}",
            format_pick(&result.filled_primary, &result.filled_secondary).dimmed()
        );
    }
    for rejected in &result.rejected {
        println!("  {} {}: {}", "rejected".red(), rejected.source_id, rejected.reason);
    }
}

fn cmd_perturb(args: SeedArgs, format: OutputFormat) -> anyhow::Result<()> {
    let p = Perturbation::generate(&mut request_rng(args.seed));
    if format == OutputFormat::Json {
        return print_json(&p);
    }
    println!("{} {}", p.image.filename.bold(), p.image.description.dimmed());
    println!("  Chaos:     {:.3}", p.chaos_factor);
    println!("  Harmony:   {:.3}", p.harmony_factor);
    println!("  Cosmic:    {:.3}", p.cosmic_alignment);
    println!("  Intensity: {}", format!("{:.3}", p.overall_intensity).yellow());
    println!("  Energy:    {}", p.energy_level.to_string().cyan());
    println!("  Meditate {} minutes: \"{}\"", p.meditation_minutes, p.mantra.italic());
    Ok(())
}

fn cmd_draw(args: SeedArgs, format: OutputFormat) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let draw = DrawSimulator::default().latest(today, &mut request_rng(args.seed));
    if format == OutputFormat::Json {
        return print_json(&draw);
    }
    print_draw(&draw);
    Ok(())
}

fn print_draw(draw: &LatestDraw) {
    println!(
        "Period {} ({} {})",
        draw.period.yellow().bold(),
        draw.draw_date,
        draw.draw_time
    );
    println!("  {}", draw.winning_numbers.display.bold());
    for tier in &draw.prize_breakdown {
        println!(
            "  Tier {}: {} winners x {} (x10k)  [{}]",
            tier.level, tier.winners, tier.prize_per_winner, tier.condition
        );
    }
    let rollover = if draw.jackpot.is_rollover { " (rollover)" } else { "" };
    println!("  Jackpot pool: {}{}", draw.jackpot.current_pool, rollover);
    println!(
        "  Next draw {} in {} days",
        draw.next_draw.date.to_string().cyan(),
        draw.next_draw.days_until
    );
}

fn cmd_report(args: ReportArgs, format: OutputFormat) -> anyhow::Result<()> {
    let combiner = EnsembleCombiner::new(EnsembleConfig::default())?;
    let mut rng = request_rng(args.seed);
    let candidates = generate_all(&default_sources(), &combiner.config().game, &mut rng);
    let result = combiner.combine(&candidates, None, &mut rng)?;

    let generated_at = Local::now();
    let content = render_markdown(
        &args.period,
        &args.last_period,
        &result,
        generated_at.naive_local(),
    );
    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "content": content,
            "format": "markdown",
            "period": args.period,
            "generated_at": generated_at.to_rfc3339(),
        }));
    }
    println!("{content}");
    Ok(())
}

fn cmd_analyze(args: SeedArgs, format: OutputFormat) -> anyhow::Result<()> {
    let analysis = DataAnalysis::simulate(
        &GameConfig::default(),
        Local::now().naive_local(),
        &mut request_rng(args.seed),
    )?;
    if format == OutputFormat::Json {
        return print_json(&analysis);
    }

    println!(
        "{} draws, hot/cold over the last {}",
        analysis.total_draws.to_string().bold(),
        analysis.recent_window
    );
    for (label, zone) in [("Primary", Zone::Primary), ("Secondary", Zone::Secondary)] {
        let stats = analysis.zone(zone);
        println!("{}", label.yellow().bold());
        println!("  {} {}", format!("{:<6}", "hot").red(), pad_numbers(&stats.hot));
        println!("  {} {}", format!("{:<6}", "cold").blue(), pad_numbers(&stats.cold));
        println!("  {} {}", format!("{:<6}", "most").green(), pad_numbers(&stats.most_frequent));
        println!("  {} {}", format!("{:<6}", "least").dimmed(), pad_numbers(&stats.least_frequent));
    }
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let server = LottoServer::new(config)?;
    println!(
        "{} Lotto Oracle listening on {}",
        "✓".green().bold(),
        server.config().bind_addr.to_string().bold()
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}
