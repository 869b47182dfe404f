// AlMumin - Quran Reader Core
// Copyright (C) 2025 AlMumin contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


use almumin_core::api::QuranClient;
use almumin_core::audio::{AudioSink, PlaybackState, ProcessSink, SilentSink};
use almumin_core::config::AppConfig;
use almumin_core::reader::{
    BookmarksView, ChapterDetail, ChapterListView, ChapterPage, ChapterView, Dashboard, PageLink,
    Route, SettingsForm, RECITERS, TRANSLATIONS,
};
use almumin_core::storage::models::{Bookmark, FontSize, Theme};
use almumin_core::storage::Store;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Edition used for the source text when bookmarking from the command line
const SOURCE_EDITION: &str = "quran-uthmani";

#[derive(Parser)]
#[command(name = "almumin-cli")]
#[command(about = "AlMumin - Quran reader in the terminal", long_about = None)]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the storage directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List chapters, filtered and paginated
    Chapters {
        /// Filter by name, title or number
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Narrow page strip
        #[arg(long)]
        compact: bool,
    },
    /// Show a chapter with its translation
    Read {
        chapter: u32,
    },
    /// Recite a chapter verse by verse
    Play {
        chapter: u32,
        /// Verse to start from
        #[arg(long, default_value_t = 1)]
        from: u32,
        /// Resolve clips without playing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Search verses in a translation
    Search {
        query: String,
        /// Translation to search (defaults to the configured one)
        #[arg(short, long)]
        translation: Option<String>,
    },
    /// Manage bookmarks
    Bookmarks {
        #[command(subcommand)]
        action: Option<BookmarkAction>,
    },
    /// Show or change preferences
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
    /// Reopen the last chapter read
    Continue,
    /// Open a route such as `/surah/36` or `/bookmarks`
    Open {
        path: String,
    },
}

#[derive(Subcommand)]
enum BookmarkAction {
    List,
    Add { chapter: u32, verse: u32 },
    Remove { chapter: u32, verse: u32 },
    Clear,
}

#[derive(Subcommand)]
enum SettingsAction {
    Show,
    Set {
        #[arg(long)]
        translation: Option<String>,
        #[arg(long)]
        reciter: Option<String>,
        /// small, medium or large
        #[arg(long)]
        font_size: Option<String>,
        /// light or dark
        #[arg(long)]
        theme: Option<String>,
    },
    Reset,
    ToggleTheme,
}

struct App {
    config: AppConfig,
    client: QuranClient,
    store: Store,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let client = QuranClient::with_config(config.client_config())?;
    let data_dir = config.data_dir();
    let store = Store::open(&data_dir)
        .with_context(|| format!("Failed to open storage at {}", data_dir.display()))?;
    tracing::debug!(data_dir = %data_dir.display(), api = client.base_url(), "starting");

    let app = App { config, client, store };

    match cli.command {
        Commands::Chapters { query, page, compact } => list_chapters(&app, &query, page, compact).await,
        Commands::Read { chapter } => read_chapter(&app, chapter).await,
        Commands::Play { chapter, from, dry_run } => {
            if dry_run {
                play_chapter(&app, chapter, from, SilentSink::default()).await
            } else {
                let sink = ProcessSink::new(&app.config.player_command)?;
                play_chapter(&app, chapter, from, sink).await
            }
        }
        Commands::Search { query, translation } => search(&app, &query, translation).await,
        Commands::Bookmarks { action } => bookmarks(&app, action.unwrap_or(BookmarkAction::List)).await,
        Commands::Settings { action } => settings(&app, action.unwrap_or(SettingsAction::Show)),
        Commands::Continue => {
            let Some(card) = Dashboard::load(&app.store).continue_reading else {
                println!("Nothing read yet. Try `almumin-cli read 1`.");
                return Ok(());
            };
            println!("Continue reading: {} (verse {})", card.surah_name, card.ayah_number);
            open_route(&app, card.route).await
        }
        Commands::Open { path } => open_route(&app, Route::parse(&path)).await,
    }
}

async fn open_route(app: &App, route: Route) -> Result<()> {
    match route {
        Route::ChapterList => list_chapters(app, "", 1, false).await,
        Route::ChapterDetail(n) => read_chapter(app, n).await,
        Route::Bookmarks => bookmarks(app, BookmarkAction::List).await,
        Route::Settings => settings(app, SettingsAction::Show),
        Route::NotFound(path) => bail!("No such page: {}", path),
    }
}

async fn list_chapters(app: &App, query: &str, page: usize, compact: bool) -> Result<()> {
    let chapters = app.client.get_surahs().await?;
    let mut view = ChapterListView::with_page_size(chapters, app.config.page_size);
    view.set_query(query);
    view.goto_page(page);
    view.set_compact(compact);

    let snapshot = view.snapshot();
    println!(
        "{} chapters found - Page {} of {}",
        snapshot.matches, snapshot.page.number, snapshot.page.total_pages
    );
    for chapter in &snapshot.page.items {
        println!(
            "{:>4}. {:<22} {:<28} {:>3} verses  {}",
            chapter.number,
            chapter.english_name,
            chapter.english_name_translation,
            chapter.number_of_ayahs,
            chapter.revelation_type.as_str()
        );
    }

    if !snapshot.links.is_empty() {
        let strip: Vec<String> = snapshot
            .links
            .iter()
            .map(|link| match link {
                PageLink::Page(n) if *n == snapshot.page.number => format!("[{}]", n),
                PageLink::Page(n) => n.to_string(),
                PageLink::Gap => "...".to_string(),
            })
            .collect();
        println!(
            "Showing {}-{} of {}   {}",
            snapshot.page.start_item,
            snapshot.page.end_item,
            snapshot.page.total_items,
            strip.join(" ")
        );
    }
    Ok(())
}

/// Open a chapter page and wait for its load
async fn load_page<K: AudioSink + Clone>(
    app: &App,
    chapter: u32,
    sink: K,
) -> Result<(ChapterPage<QuranClient, K>, ChapterDetail)> {
    let mut page = ChapterPage::open(app.client.clone(), sink, app.store.clone(), chapter);
    match page.wait_loaded().await {
        ChapterView::Ready(detail) => Ok((page, detail)),
        ChapterView::Failed { message, back } => {
            bail!("{} (back to {})", message, back)
        }
        ChapterView::Loading => bail!("Chapter {} did not finish loading", chapter),
    }
}

async fn read_chapter(app: &App, chapter: u32) -> Result<()> {
    let (_page, detail) = load_page(app, chapter, SilentSink::default()).await?;
    let settings = app.store.settings();

    println!("{}", detail.chapter.name);
    println!(
        "{} - {}  ({} verses, {})",
        detail.chapter.english_name,
        detail.chapter.english_name_translation,
        detail.chapter.number_of_ayahs,
        detail.chapter.revelation_type.as_str()
    );
    if let Some(edition) = &detail.edition {
        println!("Translation: {} [{}]", edition.english_name, edition.identifier);
    }
    tracing::debug!(scale = settings.font_size.text_scale(), "rendering");
    println!();

    for verse in &detail.verses {
        let mark = if verse.bookmarked { "*" } else { " " };
        println!("{}{:>4}  {}", mark, verse.number_in_surah, verse.text);
        if !verse.translation.is_empty() {
            println!("       {}", verse.translation);
        }
    }
    Ok(())
}

async fn play_chapter<K: AudioSink + Clone>(app: &App, chapter: u32, from: u32, sink: K) -> Result<()> {
    let (mut page, detail) = load_page(app, chapter, sink).await?;
    let index = detail
        .verses
        .iter()
        .position(|v| v.number_in_surah == from)
        .with_context(|| format!("Chapter {} has no verse {}", chapter, from))?;

    page.play_from(index).await?;
    let mut rx = page
        .subscribe_playback()
        .context("Playback did not start")?;

    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            if let PlaybackState::Playing { verse, .. } = *rx.borrow_and_update() {
                println!("> {}:{}", chapter, verse);
            }
        }
    });

    tokio::select! {
        _ = page.wait_playback_idle() => {}
        _ = tokio::signal::ctrl_c() => {
            println!("Stopping");
        }
    }
    page.stop_audio().await;
    printer.abort();
    Ok(())
}

async fn search(app: &App, query: &str, translation: Option<String>) -> Result<()> {
    let translation = translation.unwrap_or_else(|| app.store.settings().translation);
    let results = app.client.search_ayahs(query, &translation).await?;

    println!("{} matches for \"{}\" in {}", results.count, query, translation);
    for hit in &results.matches {
        println!(
            "{:>3}:{:<3} {:<20} {}",
            hit.surah.number, hit.number_in_surah, hit.surah.english_name, hit.text
        );
    }
    Ok(())
}

async fn bookmarks(app: &App, action: BookmarkAction) -> Result<()> {
    let view = BookmarksView::new(app.store.clone());
    match action {
        BookmarkAction::List => {
            let entries = view.entries();
            if entries.is_empty() {
                println!("No bookmarks yet.");
            }
            for bookmark in &entries {
                println!(
                    "{}:{} {} -> {}",
                    bookmark.surah_number,
                    bookmark.ayah_number,
                    bookmark.surah_name,
                    BookmarksView::read_route(bookmark)
                );
                println!("    {}", bookmark.text);
                if !bookmark.translation.is_empty() {
                    println!("    {}", bookmark.translation);
                }
            }
        }
        BookmarkAction::Add { chapter, verse } => {
            if app.store.is_bookmarked(chapter, verse) {
                println!("{}:{} is already bookmarked", chapter, verse);
                return Ok(());
            }
            let translation = app.store.settings().translation;
            let (source, translated) = tokio::try_join!(
                app.client.get_ayah_with_translation(chapter, verse, SOURCE_EDITION),
                app.client.get_ayah_with_translation(chapter, verse, &translation),
            )?;
            app.store.toggle_bookmark(Bookmark {
                surah_number: chapter,
                surah_name: source.surah.english_name.clone(),
                ayah_number: verse,
                text: source.verse.text,
                translation: translated.verse.text,
            })?;
            println!("Bookmarked {} {}:{}", source.surah.english_name, chapter, verse);
        }
        BookmarkAction::Remove { chapter, verse } => {
            if view.remove(chapter, verse)? {
                println!("Removed {}:{}", chapter, verse);
            } else {
                println!("{}:{} was not bookmarked", chapter, verse);
            }
        }
        BookmarkAction::Clear => {
            view.clear_all()?;
            println!("All bookmarks removed");
        }
    }
    Ok(())
}

fn settings(app: &App, action: SettingsAction) -> Result<()> {
    let form = SettingsForm::new(app.store.clone());
    match action {
        SettingsAction::Show => {}
        SettingsAction::Set {
            translation,
            reciter,
            font_size,
            theme,
        } => {
            if let Some(id) = translation {
                form.set_translation(&id)?;
            }
            if let Some(id) = reciter {
                form.set_reciter(&id)?;
            }
            if let Some(size) = font_size {
                let Some(size) = FontSize::parse(&size) else {
                    bail!("Unknown font size '{}' (small, medium, large)", size);
                };
                form.set_font_size(size)?;
            }
            if let Some(theme) = theme {
                let Some(theme) = Theme::parse(&theme) else {
                    bail!("Unknown theme '{}' (light, dark)", theme);
                };
                form.set_theme(theme)?;
            }
        }
        SettingsAction::Reset => form.reset_to_defaults()?,
        SettingsAction::ToggleTheme => {
            let theme = form.toggle_theme()?;
            println!("Theme: {}", theme.as_str());
            return Ok(());
        }
    }

    let current = form.current();
    println!("Translation: {}", current.translation);
    println!("Reciter:     {}", current.reciter);
    println!("Font size:   {} ({})", current.font_size.label(), current.font_size.text_scale());
    println!("Theme:       {}", current.theme.as_str());
    println!();
    println!(
        "Translations: {}",
        TRANSLATIONS.iter().map(|e| e.id).collect::<Vec<_>>().join(", ")
    );
    println!(
        "Reciters:     {}",
        RECITERS.iter().map(|e| e.id).collect::<Vec<_>>().join(", ")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_nested_subcommands() {
        let cli = Cli::parse_from(["almumin-cli", "bookmarks", "add", "2", "255"]);
        assert!(matches!(
            cli.command,
            Commands::Bookmarks {
                action: Some(BookmarkAction::Add { chapter: 2, verse: 255 })
            }
        ));

        let cli = Cli::parse_from(["almumin-cli", "-v", "play", "36", "--from", "5", "--dry-run"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Play { chapter: 36, from: 5, dry_run: true }));

        let cli = Cli::parse_from(["almumin-cli", "settings", "toggle-theme"]);
        assert!(matches!(
            cli.command,
            Commands::Settings { action: Some(SettingsAction::ToggleTheme) }
        ));
    }
}
