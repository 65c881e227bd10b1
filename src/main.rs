use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use blog_list::{
    Blog, BlogId, BlogIdError, BlogStore, BlogUpdate, NewBlog, StoreError, list_helper,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Blog store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    BlogId(#[from] BlogIdError),

    #[error("Blog '{0}' not found")]
    BlogNotFound(BlogId),
}

#[derive(Parser)]
#[command(name = "blog-list")]
#[command(about = "Manage a blog list store and inspect its like statistics")]
struct Cli {
    /// Store path
    #[arg(long, global = true, default_value = ".blog-list", env = "BLOG_LIST_PATH")]
    path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog store
    Init,

    /// List all blogs, oldest first
    List {
        /// Print the blogs as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Show a single blog as JSON
    Get {
        /// Blog id
        id: String,
    },

    /// Add a blog
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        url: String,

        #[arg(short, long)]
        author: Option<String>,

        /// Initial like count (defaults to 0)
        #[arg(short, long)]
        likes: Option<u64>,
    },

    /// Add one like to a blog
    Like {
        /// Blog id
        id: String,
    },

    /// Delete a blog
    Delete {
        /// Blog id
        id: String,
    },

    /// Import blogs from a JSON file holding an array of blog objects
    Import {
        file: PathBuf,
    },

    /// Delete every blog
    Clear,

    /// Show blog count, total likes and the favorite blog
    Stats {
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = cli.path;

    match cli.command {
        Commands::Init => {
            let store = BlogStore::init(&path)?;
            drop(store);
            println!("Initialized blog store at {}", path.display());
            Ok(())
        }
        Commands::List { json } => {
            let store = BlogStore::open(&path)?;
            let blogs = store.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&blogs)?);
            } else if blogs.is_empty() {
                println!("No blogs");
            } else {
                for blog in &blogs {
                    println!("{}", describe(blog));
                }
            }
            Ok(())
        }
        Commands::Get { id } => {
            let store = BlogStore::open(&path)?;
            let id: BlogId = id.parse()?;
            let blog = store.get(&id)?.ok_or(AppError::BlogNotFound(id))?;
            println!("{}", serde_json::to_string_pretty(&blog)?);
            Ok(())
        }
        Commands::Add {
            title,
            url,
            author,
            likes,
        } => {
            let store = BlogStore::open(&path)?;
            let blog = store.create(NewBlog {
                title: Some(title),
                author,
                url: Some(url),
                likes,
            })?;
            println!("Added {}", describe(&blog));
            Ok(())
        }
        Commands::Like { id } => {
            let store = BlogStore::open(&path)?;
            let id: BlogId = id.parse()?;
            let current = store.get(&id)?.ok_or_else(|| AppError::BlogNotFound(id.clone()))?;
            let update = BlogUpdate {
                likes: Some(current.likes.saturating_add(1)),
                ..BlogUpdate::default()
            };
            let blog = store.update(&id, update)?.ok_or(AppError::BlogNotFound(id))?;
            println!("{}", describe(&blog));
            Ok(())
        }
        Commands::Delete { id } => {
            let store = BlogStore::open(&path)?;
            let id: BlogId = id.parse()?;
            if store.delete(&id)? {
                println!("Deleted blog {}", id);
                Ok(())
            } else {
                Err(AppError::BlogNotFound(id))
            }
        }
        Commands::Import { file } => {
            let store = BlogStore::open_or_init(&path)?;
            let content = std::fs::read_to_string(&file)?;
            let new_blogs: Vec<NewBlog> = serde_json::from_str(&content)?;
            let blogs = store.insert_many(new_blogs)?;
            println!("Imported {} blog(s) from {}", blogs.len(), file.display());
            Ok(())
        }
        Commands::Clear => {
            let store = BlogStore::open(&path)?;
            let removed = store.clear()?;
            println!("Deleted {} blog(s)", removed);
            Ok(())
        }
        Commands::Stats { json } => {
            let store = BlogStore::open(&path)?;
            let blogs = store.list()?;
            let stats = list_helper::stats(&blogs);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Blogs: {}", stats.count);
                println!("Total likes: {}", stats.total_likes);
                match &stats.favorite {
                    Some(blog) => println!("Favorite: {}", describe(blog)),
                    None => println!("Favorite: none"),
                }
            }
            Ok(())
        }
    }
}

fn describe(blog: &Blog) -> String {
    match &blog.author {
        Some(author) => format!(
            "{} \"{}\" by {} <{}> ({} likes)",
            blog.id, blog.title, author, blog.url, blog.likes
        ),
        None => format!(
            "{} \"{}\" <{}> ({} likes)",
            blog.id, blog.title, blog.url, blog.likes
        ),
    }
}
