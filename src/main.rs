use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use scout::{
    rank, Assembler, Catalog, CatalogStore, EngineConfig, PreparedQuery, QueryScorer, Response,
    Selection, Service,
};

mod cli;
use cli::display::*;
use cli::{Cli, Commands, PolicyArgs};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SCOUT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let store = open_store(cli.catalog.as_deref())?;
    let base_config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Recommend {
            query,
            policy,
            json,
        } => {
            let assembler = Assembler::new(configure(base_config, &policy)?);
            run_recommend(&store, &assembler, &query, json)
        }
        Commands::Score {
            query,
            limit,
            profile,
            json,
        } => {
            let mut config = base_config;
            if let Some(profile) = profile {
                config.profile = profile.into();
            }
            run_score(&store, &config, &query, limit, json)
        }
        Commands::Inspect { json } => run_inspect(&store, cli.catalog.as_deref(), json),
        Commands::Batch {
            input,
            output,
            policy,
        } => {
            let assembler = Assembler::new(configure(base_config, &policy)?);
            run_batch(&store, &assembler, &input, output.as_deref())
        }
        Commands::Serve { policy } => {
            let assembler = Assembler::new(configure(base_config, &policy)?);
            run_serve(Service::new(Arc::new(store), assembler))
        }
    }
}

fn open_store(path: Option<&Path>) -> Result<CatalogStore> {
    match path {
        Some(path) => CatalogStore::open(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(CatalogStore::new(
            Catalog::builtin().context("Built-in catalog is invalid")?,
        )),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn configure(mut config: EngineConfig, policy: &PolicyArgs) -> Result<EngineConfig> {
    policy.apply(&mut config);
    config.validate()?;
    Ok(config)
}

// ═══════════════════════════════════════════════════════════════════════════
// RECOMMEND
// ═══════════════════════════════════════════════════════════════════════════

fn run_recommend(store: &CatalogStore, assembler: &Assembler, query: &str, json: bool) -> Result<()> {
    let snapshot = store.snapshot();
    let outcome = assembler.assemble(query, snapshot.entries());

    if json {
        let response = match outcome {
            Ok(selection) => Response::recommendations(selection),
            Err(err) => Response::failure(err.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let selection = outcome?;
    print_selection(query, &selection);
    Ok(())
}

fn print_selection(query: &str, selection: &Selection<'_>) {
    println!();
    double_header();
    if query.trim().is_empty() {
        title("Top-rated tools");
    } else {
        title(&format!("Tools for \"{}\"", truncate(query.trim(), 60)));
    }
    double_footer();
    println!();

    for pick in &selection.picks {
        section_top(&pick.slot);
        match pick.entry {
            Some(entry) => {
                let heading = format!(
                    " {}  {}  {}",
                    themed(BRIGHT_CYAN, &[BOLD], &entry.name),
                    tier_badge(entry.tier, entry.badge_text()),
                    rating(entry.rating)
                );
                row(&heading);
                if !entry.tagline.is_empty() {
                    wrapped_rows(&entry.tagline, 1);
                }
                if let Some(preview) = &entry.mini_preview {
                    for line in wrap(preview, BOX_WIDTH - 2) {
                        row(&format!(" {}", themed(GRAY, &[], &line)));
                    }
                }
                row("");
                let cta = entry.cta_label.as_deref().unwrap_or("Visit Site");
                row(&format!(" {} ↗ {}", cta, themed(BLUE, &[], entry.cta_target())));
                if let Some(says) = &entry.scout_says {
                    row("");
                    row(&format!(" {}", themed(MAGENTA, &[BOLD], "Scout Says:")));
                    wrapped_rows(says, 1);
                }
                let score = pick.score.unwrap_or(0.0);
                let mut footer = format!(" score {}", score_value(score).trim_start());
                if pick.fallback {
                    footer.push_str(&themed(YELLOW, &[DIM], "  (filled from another tier)"));
                }
                row("");
                row(&footer);
            }
            None => row(&themed(GRAY, &[DIM], " No matching tool")),
        }
        section_bot();
    }

    if let Some(summary) = &selection.summary {
        println!();
        for line in wrap(summary, BOX_WIDTH) {
            println!("{}", line);
        }
    }
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════
// SCORE
// ═══════════════════════════════════════════════════════════════════════════

fn run_score(
    store: &CatalogStore,
    config: &EngineConfig,
    query: &str,
    limit: usize,
    json: bool,
) -> Result<()> {
    let snapshot = store.snapshot();
    let prepared = PreparedQuery::new(query);
    let scorer = QueryScorer::new(&prepared, config.weights, config.profile);
    let ranked = rank(&scorer, snapshot.entries(), &HashSet::new());

    if json {
        let rows: Vec<Value> = ranked
            .iter()
            .take(limit)
            .map(|c| {
                json!({
                    "id": c.entry.id,
                    "tier": c.entry.tier,
                    "score": c.score,
                    "rating": c.entry.rating,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    section_top(&format!("Scores for \"{}\"", truncate(prepared.normalized(), 50)));
    row(&themed(GRAY, &[DIM], "   #  SCORE    TIER          ID"));
    for (i, candidate) in ranked.iter().take(limit).enumerate() {
        let entry = candidate.entry;
        row(&format!(
            " {:>3} {}   {}  {}",
            i + 1,
            score_value(candidate.score),
            pad_right(&tier_badge(entry.tier, entry.tier.as_str()), 12),
            truncate(&entry.id, 50)
        ));
    }
    if ranked.len() > limit {
        row(&themed(GRAY, &[DIM], &format!("     ... {} more", ranked.len() - limit)));
    }
    section_bot();
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

fn run_inspect(store: &CatalogStore, path: Option<&Path>, json: bool) -> Result<()> {
    let catalog = store.snapshot();
    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(built-in)".to_string());

    if json {
        let tiers: serde_json::Map<String, Value> = catalog
            .tier_counts()
            .into_iter()
            .map(|(tier, count)| (tier.to_string(), json!(count)))
            .collect();
        let summary = json!({
            "source": source,
            "entries": catalog.len(),
            "fingerprint": catalog.fingerprint_hex(),
            "tiers": tiers,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    section_top("CATALOG");
    row(&format!(" Source       {}", truncate(&source, 60)));
    row(&format!(" Entries      {}", catalog.len()));
    row(&format!(" Fingerprint  {}", themed(CYAN, &[], &catalog.fingerprint_hex())));
    section_mid("TIERS");
    for (tier, count) in catalog.tier_counts() {
        let best = catalog
            .partition(&[tier])
            .max_by(|a, b| a.rating.total_cmp(&b.rating))
            .map(|e| format!("best rated: {} {}", e.name, rating(e.rating)))
            .unwrap_or_default();
        row(&format!(
            " {} {:>4}   {}",
            pad_right(&tier_badge(tier, tier.default_badge()), 12),
            count,
            best
        ));
    }
    section_mid("ENTRIES");
    for entry in catalog.entries() {
        row(&format!(
            " {} {}  {}",
            pad_right(&tier_badge(entry.tier, entry.tier.as_str()), 12),
            rating(entry.rating),
            truncate(&format!("{} ({})", entry.name, entry.id), 56)
        ));
    }
    section_bot();
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// BATCH
// ═══════════════════════════════════════════════════════════════════════════

fn run_batch(
    store: &CatalogStore,
    assembler: &Assembler,
    input: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("Failed to read queries from {}", input.display()))?;
    let queries: Vec<&str> = raw.lines().filter(|l| !l.trim().is_empty()).collect();
    let snapshot = store.snapshot();

    let answer = |query: &str| -> Value {
        let response = match assembler.assemble(query, snapshot.entries()) {
            Ok(selection) => Response::recommendations(selection),
            Err(err) => Response::failure(err.to_string()),
        };
        let mut value = serde_json::to_value(&response)
            .unwrap_or_else(|err| json!({ "ok": false, "error": err.to_string() }));
        if let Value::Object(map) = &mut value {
            map.insert("query".to_string(), Value::String(query.to_string()));
        }
        value
    };

    #[cfg(feature = "parallel")]
    let answers: Vec<Value> = {
        use indicatif::{ProgressBar, ProgressStyle};
        use rayon::prelude::*;

        let pb = ProgressBar::new(queries.len() as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
        ) {
            pb.set_style(style.progress_chars("━━╸"));
        }
        pb.set_prefix("Scoring");
        let answers = queries
            .par_iter()
            .map(|q| {
                let value = answer(*q);
                pb.inc(1);
                value
            })
            .collect();
        pb.finish_with_message(format!("{} queries", queries.len()));
        answers
    };

    #[cfg(not(feature = "parallel"))]
    let answers: Vec<Value> = queries.iter().map(|q| answer(*q)).collect();

    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(sink);
    for value in &answers {
        writeln!(writer, "{}", value)?;
    }
    writer.flush()?;

    tracing::info!(
        queries = answers.len(),
        catalog = %snapshot.fingerprint_hex(),
        "batch complete"
    );
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// SERVE
// ═══════════════════════════════════════════════════════════════════════════

fn run_serve(service: Service) -> Result<()> {
    let source: Option<PathBuf> = service.store().source().map(Path::to_path_buf);
    tracing::info!(
        catalog = ?source,
        entries = service.store().snapshot().len(),
        "serving on stdin/stdout"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read message")?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = service.handle_json(&line);
        writeln!(stdout, "{}", reply)?;
        stdout.flush()?;
    }
    Ok(())
}
