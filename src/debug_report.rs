use consulta::{Clause, ResolveDetails, Source};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

fn section(title: &str, palette: &ansi::Palette) {
    println!("\n{}", palette.paint(format!("━━━ {title} ━━━"), ansi::GRAY));
}

pub fn print_run(details: &ResolveDetails, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Resolving: \"{}\"", details.text), ansi::CYAN)));
    println!("  {} {}", palette.dim("normalized:"), palette.paint(details.normalized.as_str(), ansi::BLUE));

    section("Intent", &palette);
    print_intent(details, &palette);

    section("Entities", &palette);
    print_entities(details, &palette);

    section("Candidates", &palette);
    print_candidates(details, &palette);

    section("Result", &palette);
    let sanitized = &details.sanitized;
    if sanitized.sql.is_empty() {
        println!("  {}", palette.dim("(empty)"));
    } else {
        println!("  {}", palette.bold(palette.paint(&sanitized.sql, ansi::GREEN)));
    }
    if sanitized.truncated {
        println!(
            "  {}",
            palette.paint(format!("⚠ dropped {} extra statement(s)", sanitized.dropped_statements), ansi::YELLOW)
        );
    }

    section("Timing", &palette);
    let m = &details.metrics;
    println!(
        "  Total: {}  │  Classify: {}  │  Extract: {}  │  Synthesize: {}  │  Arbitrate: {}",
        palette.paint(format!("{:?}", m.total), ansi::GREEN),
        palette.dim(format!("{:?}", m.classify)),
        palette.dim(format!("{:?}", m.extract)),
        palette.dim(format!("{:?}", m.synthesize)),
        palette.dim(format!("{:?}", m.sanitize)),
    );
    println!();
}

fn print_intent(details: &ResolveDetails, palette: &ansi::Palette) {
    let intent = &details.intent;
    println!(
        "  {} {} {}",
        palette.bold(palette.paint(intent.intent.name(), ansi::GREEN)),
        palette.dim("│ confidence"),
        palette.paint(format!("{:.3}", intent.confidence), ansi::YELLOW),
    );
    if intent.matched_keywords.is_empty() {
        println!("  {}", palette.dim("no keywords matched"));
    } else {
        println!("  {} {}", palette.dim("keywords:"), palette.paint(intent.matched_keywords.join(", "), ansi::CYAN));
    }
    let mut notes = Vec::new();
    if intent.is_question() {
        notes.push("question".to_string());
    }
    if intent.is_command() {
        notes.push("command".to_string());
    }
    if let Some(tag) = intent.override_tag {
        notes.push(format!("override → {tag}"));
    }
    if !notes.is_empty() {
        println!("  {} {}", palette.dim("flags:"), palette.paint(notes.join(", "), ansi::BLUE));
    }
}

fn print_entities(details: &ResolveDetails, palette: &ansi::Palette) {
    let entities = &details.entities;
    let principal = entities.principal.map(|p| p.name()).unwrap_or("none");
    println!("  {} {}", palette.dim("principal:"), palette.paint(principal, ansi::GREEN));

    if !entities.statuses.is_empty() {
        let statuses: Vec<&str> = entities.statuses.iter().map(|s| s.name()).collect();
        println!("  {} {}", palette.dim("statuses:"), palette.paint(statuses.join(", "), ansi::YELLOW));
    }
    for clause in entities.temporal.iter().chain(&entities.numeric) {
        println!("    {}", fmt_clause_compact(clause, palette));
    }
}

fn print_candidates(details: &ResolveDetails, palette: &ansi::Palette) {
    let marker = |source: Source| if details.source == source { palette.paint("✓", ansi::GREEN) } else { " ".into() };

    match &details.advanced {
        Ok(query) => {
            let shape = if query.is_generic() { "generic" } else { "specific" };
            println!(
                "  {} {} {}",
                marker(Source::Advanced),
                palette.paint("advanced", ansi::BLUE),
                palette.dim(format!("({shape})")),
            );
            println!("      {}", query.sql);
        }
        Err(err) => {
            println!("  {} {}", palette.paint("✗", ansi::RED), palette.paint("advanced", ansi::BLUE));
            println!("      {}", palette.paint(err.to_string(), ansi::RED));
        }
    }

    let classic_won = matches!(details.source, Source::Classic | Source::ClassicFallback);
    let reason = match details.source {
        Source::Advanced => "",
        Source::Classic => " (more specific than a generic listing)",
        Source::ClassicFallback => " (fallback)",
    };
    println!(
        "  {} {}{}",
        if classic_won { palette.paint("✓", ansi::GREEN) } else { " ".into() },
        palette.paint("classic", ansi::BLUE),
        palette.dim(reason),
    );
    println!("      {}", details.classic);
}

fn fmt_clause_compact(clause: &Clause, palette: &ansi::Palette) -> String {
    format!(
        "{} {} {}",
        palette.paint(format!("\"{}\"", clause.source), ansi::YELLOW),
        palette.paint(clause.rule, ansi::BLUE),
        palette.dim(&clause.predicate)
    )
}
