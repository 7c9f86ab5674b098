use dotenvy::dotenv;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rollbook::cli;
use rollbook::config::database::init_db_pool;
use rollbook::router::init_router;
use rollbook::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // Check if this is a CLI command
    if args.len() > 1 && args[1] == "create-user" {
        handle_create_user(args).await;
        return;
    }

    // Normal server startup
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format!(
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = init_app_state().await;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    println!("🚀 Server running on http://localhost:3000");
    println!("📚 Swagger UI available at http://localhost:3000/swagger-ui");
    println!("📖 Scalar UI available at http://localhost:3000/scalar");
    axum::serve(listener, app).await.unwrap();
}

async fn handle_create_user(args: Vec<String>) {
    if args.len() != 4 {
        eprintln!("Usage: {} create-user <username> <password>", args[0]);
        std::process::exit(1);
    }

    let username = &args[2];
    let password = &args[3];

    let pool = init_db_pool().await;

    match cli::create_user(&pool, username, password).await {
        Ok(_) => {
            println!("✅ User created successfully!");
            println!("   Username: {}", username);
        }
        Err(e) => {
            eprintln!("❌ Error creating user: {}", e);
            std::process::exit(1);
        }
    }
}
