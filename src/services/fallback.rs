//! Canned replies used when the gateway cannot answer a chat message.

use rand::Rng;

/// Reply used when the gateway answers without a `text` field.
pub const DEFAULT_REPLY: &str = "Mensagem recebida pelo Gateway";

/// Candidate fallback phrases, in order. The last one names the gateway being used.
pub fn fallback_phrases(gateway_url: &str) -> [String; 4] {
    [
        "Olá! Recebi sua mensagem, mas estou em modo de desenvolvimento.".to_string(),
        "Conectando ao Gateway OpenClaw...".to_string(),
        "🦖 Rex aqui! Em breve integração completa.".to_string(),
        format!("Mensagem recebida. Gateway URL: {gateway_url}"),
    ]
}

/// Pick one phrase uniformly at random.
pub fn pick_fallback_phrase<R: Rng>(rng: &mut R, gateway_url: &str) -> String {
    let mut phrases = fallback_phrases(gateway_url);
    let index = rng.random_range(0..phrases.len());
    std::mem::take(&mut phrases[index])
}
