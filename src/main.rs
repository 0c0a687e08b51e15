use anyhow::{Context, Result, bail};
use arxshelf::{
    Article, ArticleStore, ArxivClient, Command, Config, HtmlRenderer, MarkdownRenderer,
    PdfService, SearchArgs, SearchQuery, SearchResults, Settings, SettingsArgs, Summarizer,
};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Authors shown per line in terminal listings.
const AUTHOR_LIMIT: usize = 3;

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.log_level())?;

    let data_dir = config.data_dir()?;
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");

    match config.command {
        Command::Search(args) => search(&data_dir, &args),
        Command::List => list(&data_dir),
        Command::Save { reference } => save(&data_dir, &reference),
        Command::Remove { reference } => remove(&data_dir, &reference),
        Command::Show { reference, open } => show(&data_dir, &reference, open),
        Command::Pdf { reference, open, output } => pdf(&data_dir, &reference, open, output),
        Command::Summarize { reference, open } => summarize(&data_dir, &reference, open),
        Command::Export { output, no_open } => export(&data_dir, &output, no_open),
        Command::Render { input, output } => render(&data_dir, &input, output),
        Command::Settings(args) => settings(&data_dir, &args),
    }
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("ARXSHELF_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn search(data_dir: &Path, args: &SearchArgs) -> Result<()> {
    let settings = Settings::load(data_dir)?;
    let query = SearchQuery::new(args.terms.join(" "))
        .field(args.field)
        .sort(args.sort)
        .max_results(args.max_results.map_or(settings.max_results, |n| n as usize));

    let feed = ArxivClient::new()?.search(&query).context("Search failed")?;
    let store = ArticleStore::open_in(data_dir)?;
    let results = SearchResults::replace(data_dir, feed.articles)?;

    if results.articles().is_empty() {
        println!("No results");
        return Ok(());
    }

    for (index, article) in results.articles().iter().enumerate() {
        let marker = if store.contains(&article.id) { "*" } else { " " };
        print_article_line(index + 1, marker, article);
    }
    match feed.total_results {
        Some(total) => println!("\n{} of {} results", results.articles().len(), total),
        None => println!("\n{} results", results.articles().len()),
    }
    Ok(())
}

fn list(data_dir: &Path) -> Result<()> {
    let store = ArticleStore::open_in(data_dir)?;

    if store.is_empty() {
        println!("Library is empty");
        return Ok(());
    }

    for (index, article) in store.all().iter().enumerate() {
        print_article_line(index + 1, " ", article);
    }
    Ok(())
}

fn save(data_dir: &Path, reference: &str) -> Result<()> {
    let results = SearchResults::load(data_dir)?;
    let Some(article) = results.resolve(reference).cloned() else {
        bail!("No article matches \"{}\" in the last search", reference);
    };

    let mut store = ArticleStore::open_in(data_dir)?;
    let title = article.title.clone();
    if store.insert(article)? {
        println!("Saved: {}", title);
    } else {
        println!("Already saved: {}", title);
    }
    Ok(())
}

fn remove(data_dir: &Path, reference: &str) -> Result<()> {
    let mut store = ArticleStore::open_in(data_dir)?;
    let Some(id) = store.resolve(reference).map(|a| a.id.clone()) else {
        bail!("No saved article matches \"{}\"", reference);
    };

    if let Some(article) = store.remove(&id)? {
        println!("Removed: {}", article.title);
    }
    Ok(())
}

fn show(data_dir: &Path, reference: &str, open: bool) -> Result<()> {
    let article = find_article(data_dir, reference)?;

    if open {
        let settings = Settings::load(data_dir)?;
        let renderer = HtmlRenderer::with_base_size(settings.base_font_size);
        let path = arxshelf::write_article_page(&article, None, &preview_dir(), &renderer)?;
        return open_page(&path);
    }

    let markdown = MarkdownRenderer::new();
    println!("{}", article.title);
    println!("{}", article.short_id());
    if !article.authors.is_empty() {
        println!("{}", article.authors.join(", "));
    }
    if !article.categories.is_empty() {
        println!("[{}]", article.categories.join(", "));
    }
    if let Some(published) = article.published {
        println!("Published {}", arxshelf::format_relative(published, Utc::now()));
    }
    if let Some(text) = &article.abstract_text {
        println!("\n{}", markdown.plain_text(text));
    }
    for url in [&article.html_url, &article.pdf_url, &article.doi_url]
        .into_iter()
        .flatten()
    {
        println!("{}", url);
    }
    Ok(())
}

fn pdf(data_dir: &Path, reference: &str, open: bool, output: Option<PathBuf>) -> Result<()> {
    let article = find_article(data_dir, reference)?;
    let service = PdfService::new()?;

    if open {
        let path = service.download_and_open(&article)?;
        tracing::debug!(path = %path.display(), "opened PDF");
        return Ok(());
    }

    let settings = Settings::load(data_dir)?;
    let dir = output
        .or(settings.downloads_dir)
        .unwrap_or_else(arxshelf::pdf::default_downloads_dir);
    let path = service.save_to_dir(&article, &dir)?;
    let size = fs::metadata(&path).map(|m| m.len()).unwrap_or_default();
    println!(
        "Saved {} to {}",
        arxshelf::format_file_size(size as usize),
        path.display()
    );
    Ok(())
}

fn summarize(data_dir: &Path, reference: &str, open: bool) -> Result<()> {
    let article = find_article(data_dir, reference)?;
    let settings = Settings::load(data_dir)?;
    let summarizer = Summarizer::new(
        settings.summary_endpoint.as_str(),
        settings.summary_model.as_str(),
        settings.effective_api_key().unwrap_or_default(),
    )?;

    let bytes = PdfService::new()?.download(&article)?;
    let text = arxshelf::extract_pdf_text(&bytes)?;
    if text.trim().is_empty() {
        tracing::warn!(id = %article.id, "PDF has no extractable text");
    }
    let summary = summarizer.summarize(&text)?;

    if open {
        let renderer = HtmlRenderer::with_base_size(settings.base_font_size);
        let path =
            arxshelf::write_article_page(&article, Some(&summary), &preview_dir(), &renderer)?;
        return open_page(&path);
    }

    println!("{}", MarkdownRenderer::new().plain_text(&summary));
    Ok(())
}

fn export(data_dir: &Path, output: &Path, no_open: bool) -> Result<()> {
    let store = ArticleStore::open_in(data_dir)?;
    let settings = Settings::load(data_dir)?;
    let renderer = HtmlRenderer::with_base_size(settings.base_font_size);

    let index = arxshelf::export_library(store.all(), output, &renderer, Utc::now())?;
    println!("Generated: {}", index.display());
    println!("Exported {} articles", store.len());

    if !no_open && let Err(e) = open::that(&index) {
        tracing::warn!("Failed to open {}: {:#}", index.display(), e);
    }
    Ok(())
}

fn render(data_dir: &Path, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let settings = Settings::load(data_dir)?;
    let renderer = HtmlRenderer::with_base_size(settings.base_font_size);

    let output = output.unwrap_or_else(|| input.with_extension("html"));
    let title = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Document");

    arxshelf::write_document(title, &text, &output, &renderer)?;
    println!("Generated: {}", output.display());
    Ok(())
}

fn settings(data_dir: &Path, args: &SettingsArgs) -> Result<()> {
    let mut settings = Settings::load(data_dir)?;

    if args.has_changes() {
        settings.apply(args);
        settings.save(data_dir).context("Invalid configuration")?;
        println!("Settings saved");
    }

    println!("api_key          = {}", settings.masked_api_key());
    println!("base_font_size   = {}", settings.base_font_size);
    println!("max_results      = {}", settings.max_results);
    println!("summary_endpoint = {}", settings.summary_endpoint);
    println!("summary_model    = {}", settings.summary_model);
    match &settings.downloads_dir {
        Some(dir) => println!("downloads_dir    = {}", dir.display()),
        None => println!("downloads_dir    = (default)"),
    }
    Ok(())
}

/// Looks the reference up in the library first, then in the last search.
fn find_article(data_dir: &Path, reference: &str) -> Result<Article> {
    let store = ArticleStore::open_in(data_dir)?;
    if let Some(article) = store.resolve(reference) {
        return Ok(article.clone());
    }

    let results = SearchResults::load(data_dir)?;
    results
        .resolve(reference)
        .cloned()
        .with_context(|| format!("No article matches \"{}\"", reference))
}

fn print_article_line(position: usize, marker: &str, article: &Article) {
    println!("{:>3}{} {}", position, marker, article.title);
    println!(
        "     {} · {}",
        article.short_id(),
        article.author_line(AUTHOR_LIMIT)
    );
}

fn preview_dir() -> PathBuf {
    std::env::temp_dir().join("arxshelf")
}

fn open_page(path: &Path) -> Result<()> {
    println!("Generated: {}", path.display());
    open::that(path).with_context(|| format!("Failed to open {}", path.display()))
}
