use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL,
    phone VARCHAR(50),
    location VARCHAR(255),
    occupation VARCHAR(255),
    bio TEXT,
    role VARCHAR(20) NOT NULL DEFAULT 'user',
    reset_token VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

ALTER TABLE users ADD COLUMN IF NOT EXISTS reset_token VARCHAR(255);
ALTER TABLE users ADD COLUMN IF NOT EXISTS created_at TIMESTAMPTZ NOT NULL DEFAULT NOW();
UPDATE users SET role = 'user' WHERE role IS NULL;
ALTER TABLE users ALTER COLUMN role SET DEFAULT 'user';
ALTER TABLE users ALTER COLUMN role SET NOT NULL;

CREATE TABLE IF NOT EXISTS areas (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL UNIQUE,
    description TEXT,
    video_link VARCHAR(255)
);

INSERT INTO areas (name, description, video_link) VALUES
    ('Hardware', 'Componentes, montagem e manutenção de computadores', 'https://www.youtube.com/cursoemvideo'),
    ('Programação', 'Lógica, linguagens e desenvolvimento de software', 'https://www.youtube.com/cursoemvideo'),
    ('Mobile', 'Desenvolvimento e uso de dispositivos móveis', 'https://www.youtube.com/cursoemvideo'),
    ('Cursos', 'Indicações de cursos e trilhas de estudo', 'https://www.youtube.com/cursoemvideo'),
    ('Notícias', 'Novidades do mundo da tecnologia', 'https://www.youtube.com/cursoemvideo'),
    ('Comunidade', 'Espaço aberto para a comunidade', 'https://www.youtube.com/cursoemvideo'),
    ('Linux', 'Sistemas Linux, terminal e software livre', 'https://www.youtube.com/cursoemvideo')
ON CONFLICT (name) DO NOTHING;

CREATE TABLE IF NOT EXISTS comments (
    id SERIAL PRIMARY KEY,
    content TEXT NOT NULL,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    area_id INTEGER NOT NULL REFERENCES areas(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Forum tables from before areas existed use userid/createdat.
DO $$
BEGIN
    IF EXISTS (SELECT 1 FROM information_schema.columns
               WHERE table_schema = current_schema() AND table_name = 'comments'
                 AND column_name = 'userid') THEN
        IF EXISTS (SELECT 1 FROM information_schema.columns
                   WHERE table_schema = current_schema() AND table_name = 'comments'
                     AND column_name = 'user_id') THEN
            ALTER TABLE comments ALTER COLUMN userid DROP NOT NULL;
        ELSE
            ALTER TABLE comments RENAME COLUMN userid TO user_id;
        END IF;
    END IF;

    IF EXISTS (SELECT 1 FROM information_schema.columns
               WHERE table_schema = current_schema() AND table_name = 'comments'
                 AND column_name = 'createdat') THEN
        IF EXISTS (SELECT 1 FROM information_schema.columns
                   WHERE table_schema = current_schema() AND table_name = 'comments'
                     AND column_name = 'created_at') THEN
            ALTER TABLE comments ALTER COLUMN createdat DROP NOT NULL;
        ELSE
            ALTER TABLE comments RENAME COLUMN createdat TO created_at;
        END IF;
    END IF;

    IF EXISTS (SELECT 1 FROM information_schema.columns
               WHERE table_schema = current_schema() AND table_name = 'comments'
                 AND column_name = 'created_at'
                 AND data_type = 'timestamp without time zone') THEN
        ALTER TABLE comments ALTER COLUMN created_at TYPE TIMESTAMPTZ;
    END IF;
END
$$;

ALTER TABLE comments ADD COLUMN IF NOT EXISTS created_at TIMESTAMPTZ NOT NULL DEFAULT NOW();
ALTER TABLE comments ALTER COLUMN created_at SET DEFAULT NOW();
ALTER TABLE comments ADD COLUMN IF NOT EXISTS area_id INTEGER REFERENCES areas(id) ON DELETE CASCADE;
UPDATE comments SET area_id = (SELECT id FROM areas WHERE name = 'Comunidade') WHERE area_id IS NULL;
ALTER TABLE comments ALTER COLUMN area_id SET NOT NULL;

CREATE INDEX IF NOT EXISTS idx_comments_area_created ON comments (area_id, created_at DESC);

CREATE TABLE IF NOT EXISTS contents (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    category VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

/// Creates missing tables, seeds the reference areas and upgrades tables left
/// by the earlier backend (comments without areas go to "Comunidade").
/// Safe to run on every boot.
pub fn run(conn: &mut PgConnection) -> anyhow::Result<()> {
    conn.batch_execute(SCHEMA_SQL)?;
    tracing::info!("database schema verified");
    Ok(())
}
