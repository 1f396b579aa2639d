use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use webpen::models::NodeId;
use webpen::persistence::{export_project, ProjectStore, ShareClient, DEFAULT_API_BASE};
use webpen::runtime::AsyncRuntime;
use webpen::session::PlaygroundSession;
use webpen::{logging, preview};

const USAGE: &str = "usage: webpen <command>

commands:
  seed                 reset the stored project to the default seed
  compose [out.html]   compose the preview document for the stored project
  share                upload the stored project, print the share link
  open <slug>          replace the stored project with a shared one
  info <slug>          print metadata about a shared project
  export <dir>         write the stored project out as a directory
";

fn main() -> io::Result<()> {
    let _logging = logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprint!("{USAGE}");
        std::process::exit(2);
    };

    match command.as_str() {
        "seed" => cmd_seed(),
        "compose" => cmd_compose(args.get(1).map(PathBuf::from)),
        "share" => cmd_share(),
        "open" => match args.get(1) {
            Some(slug) => cmd_open(slug),
            None => usage_error("open needs a slug"),
        },
        "info" => match args.get(1) {
            Some(slug) => cmd_info(slug),
            None => usage_error("info needs a slug"),
        },
        "export" => match args.get(1) {
            Some(dir) => cmd_export(PathBuf::from(dir)),
            None => usage_error("export needs a directory"),
        },
        other => usage_error(&format!("unknown command: {other}")),
    }
}

fn usage_error(message: &str) -> io::Result<()> {
    eprintln!("webpen: {message}");
    eprint!("{USAGE}");
    std::process::exit(2);
}

fn open_store() -> ProjectStore {
    ProjectStore::at_default_location().unwrap_or_else(|| {
        let fallback = std::env::temp_dir().join("webpen").join("playground.json");
        tracing::warn!(path = %fallback.display(), "no cache directory, using temp store");
        ProjectStore::new(fallback)
    })
}

fn share_client() -> ShareClient {
    let base =
        std::env::var("WEBPEN_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    let origin =
        std::env::var("WEBPEN_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
    ShareClient::new(base, origin)
}

fn cmd_seed() -> io::Result<()> {
    let store = open_store();
    let records = webpen::persistence::seed::default_project();
    store.save(&records);
    println!(
        "reset {} to the default {}-file project",
        store.path().display(),
        records.len()
    );
    Ok(())
}

fn cmd_compose(out: Option<PathBuf>) -> io::Result<()> {
    let mut session = PlaygroundSession::new(open_store());
    // Drive past the quiescence window so the composition runs now.
    session.tick(Instant::now() + preview::DEFAULT_DELAY + Duration::from_millis(1));
    let html = session.preview_html().unwrap_or(preview::PLACEHOLDER_DOCUMENT);

    match out {
        Some(path) => {
            std::fs::write(&path, html)?;
            println!("wrote {}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

fn cmd_share() -> io::Result<()> {
    let mut session = PlaygroundSession::new(open_store());
    let records = session.records();
    let (runtime, _rx) = AsyncRuntime::new()?;

    match runtime.block_on(share_client().share(&records)) {
        Ok(receipt) => {
            println!("shared as {} (id {})", receipt.slug, receipt.id);
            println!("{}", receipt.url);
            Ok(())
        }
        Err(error) => {
            eprintln!("webpen: {error}");
            std::process::exit(1);
        }
    }
}

fn cmd_open(slug: &str) -> io::Result<()> {
    let mut session = PlaygroundSession::new(open_store());
    let (runtime, _rx) = AsyncRuntime::new()?;

    match runtime.block_on(share_client().load_shared(slug)) {
        Ok(files) => match session.apply_shared(&files) {
            Ok(()) => {
                println!("loaded {} ({} entries)", slug, files.len());
                print_tree(&mut session);
                Ok(())
            }
            Err(error) => {
                eprintln!("webpen: shared project is inconsistent: {error}");
                std::process::exit(1);
            }
        },
        Err(error) => {
            eprintln!("webpen: {error}");
            std::process::exit(1);
        }
    }
}

fn cmd_info(slug: &str) -> io::Result<()> {
    let (runtime, _rx) = AsyncRuntime::new()?;

    match runtime.block_on(share_client().shared_info(slug)) {
        Ok(info) => {
            println!("slug:    {}", info.slug);
            println!("id:      {}", info.id);
            println!("files:   {}", info.files_count);
            if let Some(created) = info.created_at {
                println!("created: {created}");
            }
            if let Some(updated) = info.updated_at {
                println!("updated: {updated}");
            }
            Ok(())
        }
        Err(error) => {
            eprintln!("webpen: {error}");
            std::process::exit(1);
        }
    }
}

fn cmd_export(dir: PathBuf) -> io::Result<()> {
    let mut session = PlaygroundSession::new(open_store());
    let records = session.records();
    let name = dir
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("playground");
    export_project(&records, &dir, name)?;
    println!("exported {} entries to {}", records.len(), dir.display());
    Ok(())
}

fn print_tree(session: &mut PlaygroundSession) {
    let active: Option<NodeId> = session.active_file();
    for file in session.files() {
        let marker = if Some(file.id) == active { "*" } else { " " };
        println!("{marker} {}", file.path);
    }
}
