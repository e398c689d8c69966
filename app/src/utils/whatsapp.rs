/// WhatsApp delivery has no provider behind it; messages go to the log so
/// organisers can forward them by hand.
pub fn send_whatsapp(number: &str, message: &str) {
    tracing::info!(to = %number, %message, "WhatsApp message (not delivered)");
}
