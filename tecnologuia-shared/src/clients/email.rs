use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_name: String,
}

#[derive(Clone)]
pub struct EmailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailClient {
    /// Builds a STARTTLS relay client. No connection is made until the first send.
    pub fn new(settings: &SmtpSettings) -> Result<Self, EmailError> {
        let from = Mailbox::new(Some(settings.from_name.clone()), settings.username.parse()?);
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }

    pub async fn send_email(&self, to: &str, subject: &str, html: String) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)?;

        self.transport.send(message).await?;

        tracing::debug!(to = %to, subject = %subject, "email sent");
        Ok(())
    }

    /// `ttl_secs` is the lifetime of the token inside `reset_link`.
    pub async fn send_password_reset_link(
        &self,
        to: &str,
        reset_link: &str,
        ttl_secs: i64,
    ) -> Result<(), EmailError> {
        self.send_email(to, "Redefinição de Senha", password_reset_html(reset_link, ttl_secs))
            .await
    }
}

/// Portuguese wording for a link lifetime: whole hours when it divides evenly,
/// otherwise minutes rounded up.
fn expiry_phrase(ttl_secs: i64) -> String {
    if ttl_secs >= 3600 && ttl_secs % 3600 == 0 {
        let hours = ttl_secs / 3600;
        return if hours == 1 { "1 hora".to_string() } else { format!("{hours} horas") };
    }
    let minutes = ((ttl_secs + 59) / 60).max(1);
    if minutes == 1 {
        "1 minuto".to_string()
    } else {
        format!("{minutes} minutos")
    }
}

fn password_reset_html(reset_link: &str, ttl_secs: i64) -> String {
    let expiry = expiry_phrase(ttl_secs);
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
        <h1>Redefinição de Senha</h1>
        <p>Você solicitou a redefinição de senha. Clique no link abaixo para redefinir sua senha:</p>
        <p><a href="{reset_link}">Redefinir Senha</a></p>
        <p>Este link expira em {expiry}. Se você não solicitou essa redefinição, ignore este email.</p>
        <p>Atenciosamente,<br>Equipe Tecnologuia</p>
        </div>"#
    )
}
