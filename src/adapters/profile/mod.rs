//! Profile adapters

mod in_memory;
mod supabase;

pub use in_memory::InMemoryProfileStore;
pub use supabase::SupabaseProfileStore;
