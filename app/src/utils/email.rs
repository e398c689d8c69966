use crate::config::Config;
use lettre::{
    AsyncTransport, Message,
    message::{Attachment, Mailbox, MultiPart, SinglePart, header::ContentType},
};

const QR_CONTENT_ID: &str = "gate-pass-qr";

async fn deliver(
    config: &Config,
    to: &str,
    subject: &str,
    body: MultiPart,
    text_body: &str,
) -> Result<(), anyhow::Error> {
    let Some(mailer) = config.mailer.as_ref() else {
        tracing::info!(%to, %subject, body = %text_body, "Email delivery disabled, logging message");
        return Ok(());
    };

    let email = Message::builder()
        .from(Mailbox::new(
            Some(config.event_name.clone()),
            mailer.from.parse()?,
        ))
        .to(Mailbox::new(None, to.parse()?))
        .subject(subject)
        .multipart(body)?;

    mailer
        .transport
        .send(email)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to send email: {}", e))?;
    tracing::info!(%to, %subject, "Email sent");
    Ok(())
}

pub async fn send_email(
    config: &Config,
    to: &str,
    subject: &str,
    html_body: &str,
    text_body: &str,
) -> Result<(), anyhow::Error> {
    let body = MultiPart::alternative()
        .singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_PLAIN)
                .body(text_body.to_string()),
        )
        .singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_HTML)
                .body(html_body.to_string()),
        );

    deliver(config, to, subject, body, text_body).await
}

/// Escapes user-supplied text before it is placed in an HTML body.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn signature(config: &Config) -> String {
    format!(
        "Best regards,\nThe {} Organizing Committee\nDepartment of Cyber Security\nPrathyusha Engineering College",
        config.event_name
    )
}

pub async fn send_verification_otp_email(
    config: &Config,
    to: &str,
    name: Option<&str>,
    otp: &str,
) -> Result<(), anyhow::Error> {
    let subject = format!("Verify Your Email - {}", config.event_name);
    let name = name.filter(|n| !n.trim().is_empty()).unwrap_or("There");

    let html_body = format!(
        r#"
        <h2>Email Verification</h2>
        <p>Hi {html_name},</p>
        <p>Use the code below to verify your email address for {event} registration:</p>
        <h1 style="color: #00FF41; letter-spacing: 4px;">{otp}</h1>
        <p>If you didn't request this, ignore this email.</p>
        "#,
        html_name = html_escape(name),
        event = config.event_name,
    );
    let text_body = format!("Hi {name},\n\nYour verification OTP is: {otp}\n\n{}", signature(config));

    send_email(config, to, &subject, &html_body, &text_body).await
}

pub async fn send_password_reset_email(
    config: &Config,
    to: &str,
    otp: &str,
) -> Result<(), anyhow::Error> {
    let subject = format!("{} | OTP for Password Reset", config.event_name);
    let minutes = config.otp_ttl.num_minutes();

    let html_body = format!(
        r#"
        <h2>Password Reset Request</h2>
        <p>Dear Participant,</p>
        <p>We received a request to reset the password for your <b>{event}</b> team account.</p>
        <p>Please use the following <b>One-Time Password (OTP)</b> to proceed:</p>
        <h1 style="letter-spacing: 4px; color: #0a1a2f;">{otp}</h1>
        <p>This OTP is valid for <b>{minutes} minutes</b>. Do not share it with anyone.</p>
        <hr>
        <p>If you did not request a password reset, please ignore this email. Your account will remain secure.</p>
        "#,
        event = config.event_name,
    );
    let text_body = format!(
        "Your OTP is: {otp}\nIt is valid for {minutes} minutes.\n\n{}",
        signature(config)
    );

    send_email(config, to, &subject, &html_body, &text_body).await
}

/// Leader credentials, included only in the team leader's copy.
pub struct Credentials<'a> {
    pub team_id: &'a str,
    pub password: &'a str,
}

pub async fn send_registration_email(
    config: &Config,
    to: &str,
    member_name: &str,
    credentials: Option<Credentials<'_>>,
) -> Result<(), anyhow::Error> {
    let subject = format!("Confirmation: Your Registration for {}!", config.event_name);

    let mut text_body = format!(
        "Dear {member_name},\n\nThank you for registering for {event}. \
         This email confirms that your registration has been successfully received.",
        event = config.event_name,
    );
    let mut html_body = format!(
        "<p>Dear {html_name},</p><p>Thank you for registering for <b>{event}</b>. \
         This email confirms that your registration has been successfully received.</p>",
        html_name = html_escape(member_name),
        event = config.event_name,
    );

    if let Some(Credentials { team_id, password }) = credentials {
        text_body.push_str(&format!(
            "\n\nYour Action Required - Login Credentials:\n\
             --------------------------------------------------\n\
             Team ID  : {team_id}\n\
             Password : {password}\n\
             --------------------------------------------------\n\
             Login Portal: {url}/login.html",
            url = config.public_url,
        ));
        html_body.push_str(&format!(
            "<h3>Login Credentials</h3><pre>Team ID  : {team_id}\nPassword : {password}</pre>\
             <p>Login Portal: <a href=\"{url}/login.html\">{url}/login.html</a></p>",
            password = html_escape(password),
            url = config.public_url,
        ));
    }

    text_body.push_str(
        "\n\nPlease bring your college ID card and a copy of this confirmation for check-in.\n\n",
    );
    text_body.push_str(&signature(config));
    html_body.push_str(
        "<p>Please bring your college ID card and a copy of this confirmation for check-in.</p>",
    );

    send_email(config, to, &subject, &html_body, &text_body).await
}

pub struct PaymentVerified<'a> {
    pub leader_name: &'a str,
    pub team_name: &'a str,
    pub team_id: &'a str,
    pub qr_png: Vec<u8>,
}

/// Confirmation mail with the gate QR code embedded inline.
pub async fn send_payment_verified_email(
    config: &Config,
    to: &str,
    verified: PaymentVerified<'_>,
) -> Result<(), anyhow::Error> {
    let PaymentVerified {
        leader_name,
        team_name,
        team_id,
        qr_png,
    } = verified;
    let subject = format!(
        "{}: Payment Verified & Registration Confirmed",
        config.event_name
    );

    let html_body = format!(
        r#"
        <div style="font-family: monospace; padding: 20px; background: #000; color: #00FF41;">
            <h2 style="border-bottom: 2px solid #00FF41; padding-bottom: 10px;">&gt; PAYMENT_VERIFIED</h2>
            <p>Dear {html_leader},</p>
            <p>Your payment for team <strong>{html_team}</strong> ({team_id}) has been successfully verified.</p>
            <p>Your slot for <strong>{event}</strong> is now fully confirmed.</p>
            <div style="margin: 20px 0; border: 1px dashed #00FF41; padding: 10px;">
                STATUS: CONFIRMED<br>
                ACCESS_LEVEL: GRANTED
            </div>
            <p>Show this QR code at the entry gate:</p>
            <img src="cid:{QR_CONTENT_ID}" alt="Entry QR code" width="320" height="320">
            <p>See you at the event!</p>
        </div>
        "#,
        html_leader = html_escape(leader_name),
        html_team = html_escape(team_name),
        event = config.event_name,
    );
    let text_body = format!(
        "Your payment for team {team_name} ({team_id}) has been verified. Registration Confirmed.\n\n{}",
        signature(config)
    );

    let body = MultiPart::alternative()
        .singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_PLAIN)
                .body(text_body.clone()),
        )
        .multipart(
            MultiPart::related()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html_body),
                )
                .singlepart(
                    Attachment::new_inline(QR_CONTENT_ID.to_string())
                        .body(qr_png, ContentType::parse("image/png")?),
                ),
        );

    deliver(config, to, &subject, body, &text_body).await
}
