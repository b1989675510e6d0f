//! Prompt text and response cleanup.

/// Prompt for the store-initialization SQL script.
///
/// The two hard requirements mirror what the client actually needs to run
/// against a managed Postgres: `ON DELETE CASCADE` on the record foreign
/// keys (so deleting a user or category does not trip a foreign-key
/// violation) and `DISABLE ROW LEVEL SECURITY` on every table (the service
/// enables RLS by default, which blocks anonymous writes).
pub fn init_script_prompt() -> String {
    "You are a PostgreSQL expert.\n\
     \n\
     Task: generate the SQL script that initializes the database for a\n\
     record-management teaching application.\n\
     \n\
     Required schema:\n\
     1. users (id SERIAL PRIMARY KEY, name TEXT, email TEXT, role TEXT)\n\
     2. categories (id SERIAL PRIMARY KEY, name TEXT, description TEXT)\n\
     3. records (id SERIAL PRIMARY KEY, title TEXT, content TEXT,\n\
        user_id INTEGER, category_id INTEGER,\n\
        created_at TIMESTAMP DEFAULT NOW())\n\
     \n\
     REQUIREMENT 1: add ON DELETE CASCADE to both foreign keys\n\
     (records.user_id and records.category_id), so deleting a user or a\n\
     category never fails with a foreign-key constraint violation.\n\
     \n\
     REQUIREMENT 2: for every table add\n\
     ALTER TABLE ... DISABLE ROW LEVEL SECURITY;\n\
     Managed Postgres services enable RLS by default, which blocks\n\
     INSERT/UPDATE/DELETE for anonymous clients; the script must disable it.\n\
     \n\
     Note the naming convention: columns are snake_case (user_id), even\n\
     though the client application uses its own field names.\n\
     \n\
     Produce, in one block:\n\
     1. a leading comment explaining that running this script fixes the\n\
        'violates row-level security policy' error;\n\
     2. DROP TABLE IF EXISTS ... CASCADE; for all three tables;\n\
     3. the CREATE TABLE statements;\n\
     4. the DISABLE ROW LEVEL SECURITY statements;\n\
     5. INSERT statements with a few rows of sample data.\n\
     \n\
     Output ONLY plain SQL, no markdown fences. Comment the sections."
        .to_string()
}

/// Prompt for the system documentation.
pub fn documentation_prompt() -> String {
    "You are a technical writer. Write the documentation for a\n\
     record-management teaching system backed by a cloud PostgreSQL store.\n\
     \n\
     Structure the answer as Markdown with tables:\n\
     \n\
     # System documentation\n\
     \n\
     ## 1. Architecture\n\
     The client talks to a cloud-hosted PostgreSQL database through its\n\
     REST interface. Every read and write goes through a synchronization\n\
     layer that refreshes the full local snapshot after each mutation.\n\
     \n\
     ## 2. Database structure\n\
     Describe the three tables using snake_case column names:\n\
     users (id, name, email, role), categories (id, name, description),\n\
     records (id, title, content, user_id, category_id, created_at).\n\
     Point out the two foreign keys on records.\n\
     \n\
     ## 3. Operating modes\n\
     Online mode: requests go straight to the store.\n\
     Offline mode (simulated): a toggle programmatically blocks every\n\
     INSERT/UPDATE/DELETE with an error, even when the network is fine,\n\
     so failure handling can be exercised deterministically.\n\
     \n\
     ## 4. Troubleshooting\n\
     - 'violates row-level security policy': RLS is enabled with no\n\
       policies; regenerate and run the initialization script to disable\n\
       it.\n\
     - delete fails with a foreign-key error: the row is still referenced;\n\
       delete the dependent records or rebuild the schema with\n\
       ON DELETE CASCADE.\n\
     \n\
     Write clearly and professionally."
        .to_string()
}

/// Strips markdown code-fence markup from a completion, leaving the raw
/// script text.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```sql", "").replace("```", "").trim().to_string()
}
