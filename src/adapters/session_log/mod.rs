//! Login audit adapters

mod in_memory;
mod supabase;

pub use in_memory::InMemorySessionLogStore;
pub use supabase::SupabaseSessionLogStore;
