// src/common/test_support.rs

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Banco em memória com o esquema e os seeds das migrações aplicados.
/// Uma única conexão: `sqlite::memory:` cria um banco por conexão.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("falha ao abrir banco em memória");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("falha ao aplicar migrações de teste");

    pool
}
