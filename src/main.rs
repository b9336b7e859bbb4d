use anyhow::Result;
use clap::{Parser, Subcommand};
use kit::areas::repository::Repository;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressable object store",
    long_about = "A minimal implementation of a git-like object store, written in Rust. \
    It covers the loose object model (blobs, trees, commits) and a read-only \
    clone path over the smart HTTP protocol.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the payload of an object in the repository. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object SHA to print")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes a file as a blob object and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object",
        long_about = "This command lists the entries of a tree object, sorted by name. \
        It requires the SHA of the tree to be specified."
    )]
    LsTree {
        #[arg(long, required = false, help = "Print entry names only")]
        name_only: bool,
        #[arg(index = 1, help = "The tree SHA to list")]
        sha: String,
    },
    #[command(
        name = "write-tree",
        about = "Snapshot the working directory into tree objects",
        long_about = "This command stores the working directory as blob and tree objects \
        and prints the id of the root tree."
    )]
    WriteTree,
    #[command(
        name = "commit-tree",
        about = "Create a commit object from a tree",
        long_about = "This command wraps an existing tree object into a commit, \
        optionally referencing a parent commit."
    )]
    CommitTree {
        #[arg(index = 1, help = "The tree SHA to commit")]
        tree: String,
        #[arg(short, long, help = "The parent commit SHA")]
        parent: Option<String>,
        #[arg(index = 2, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "clone",
        about = "Fetch a remote repository's objects",
        long_about = "This command discovers a remote's head reference over the smart HTTP \
        protocol, downloads the corresponding pack, and decodes it into loose objects. \
        No working-tree checkout is performed."
    )]
    Clone {
        #[arg(index = 1, help = "The remote repository URL")]
        url: String,
        #[arg(index = 2, help = "The target directory")]
        directory: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };

            repository.init()?
        }
        Commands::CatFile { sha } => {
            let pwd = std::env::current_dir()?;
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.cat_file(sha)?
        }
        Commands::HashObject { write, file } => {
            let pwd = std::env::current_dir()?;
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.hash_object(file, *write)?
        }
        Commands::LsTree { name_only, sha } => {
            let pwd = std::env::current_dir()?;
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.ls_tree(sha, *name_only)?
        }
        Commands::WriteTree => {
            let pwd = std::env::current_dir()?;
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.write_tree()?
        }
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => {
            let pwd = std::env::current_dir()?;
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.commit_tree(tree, parent.as_deref(), message)?
        }
        Commands::Clone { url, directory } => {
            let mut repository = Repository::new(directory, Box::new(std::io::stdout()))?;

            repository.init()?;
            repository.clone_from(url).await?
        }
    }

    Ok(())
}
