//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica collezione.

// ************************* NOTA SU SQLX ************************* //

/*
   Le query usano sqlx::query / sqlx::query_as + FromRow (controllo a run-time) e non le macro
   query! / query_as!: le macro richiedono un database raggiungibile in compilazione (o i dati
   offline in .sqlx) e qui vogliamo poter compilare e testare senza MySQL.
   Le colonne note del documento sono colonne vere, tutto il resto finisce nella colonna JSON `extra`.
   Number of Rows	Method to Call	Returns
   None	            .execute(...).await	        sqlx::Result<MySqlQueryResult>   (INSERT/UPDATE/DELETE)
   Zero or One	    .fetch_optional(...).await	sqlx::Result<Option<T>>
   Exactly One	    .fetch_one(...).await	    sqlx::Result<T>                  (COUNT(*))
   Multiple	        .fetch_all(...).await	    sqlx::Result<Vec<T>>
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod bid;
pub mod job;
pub mod memory;
pub mod traits;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{BidStore, JobStore, WriteOutcome};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use bid::BidRepository;
pub use job::JobRepository;
pub use memory::{InMemoryBidRepository, InMemoryJobRepository};
