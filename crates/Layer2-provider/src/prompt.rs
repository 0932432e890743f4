//! Prompt construction shared by every provider
//!
//! Each language gets a system prompt (role of the model) and a user prompt
//! template that embeds the change summary.

use commitai_foundation::Language;

/// Maximum length of the first line of a generated message
pub const MAX_SUBJECT_CHARS: usize = 100;

/// Conventional Commits types offered to the model
const COMMIT_TYPES: &str = "feat, fix, docs, style, refactor, perf, test, build, ci, chore";

/// System prompt for the given language
pub fn system_prompt(language: Language) -> &'static str {
    match language {
        Language::En => {
            "You are an expert at writing Git commit messages. You read code changes \
             carefully and describe precisely what changed and why, focusing on technical \
             detail and functional impact rather than file names."
        }
        Language::Es => {
            "Eres un experto en escribir mensajes de commit de Git. Lees los cambios de \
             código con atención y describes con precisión qué cambió y por qué, centrándote \
             en el detalle técnico y el impacto funcional y no en los nombres de archivo."
        }
        Language::Fr => {
            "Vous êtes un expert de la rédaction de messages de commit Git. Vous lisez les \
             modifications de code avec attention et décrivez précisément ce qui a changé et \
             pourquoi, en privilégiant le détail technique et l'impact fonctionnel plutôt que \
             les noms de fichiers."
        }
        Language::De => {
            "Sie sind Experte für Git-Commit-Nachrichten. Sie lesen Codeänderungen sorgfältig \
             und beschreiben genau, was sich geändert hat und warum, mit Fokus auf technische \
             Details und funktionale Auswirkungen statt auf Dateinamen."
        }
        Language::PtBr => {
            "Você é especialista em escrever mensagens de commit do Git. Você lê as mudanças \
             de código com atenção e descreve com precisão o que mudou e por quê, com foco no \
             detalhe técnico e no impacto funcional, e não nos nomes dos arquivos."
        }
    }
}

/// User prompt embedding the change summary
pub fn user_prompt(changes: &str, language: Language) -> String {
    let instructions = match language {
        Language::En => format!(
            "Write a commit message for the changes below.\n\
             Rules:\n\
             - Use the Conventional Commits format (type: description).\n\
             - Pick the type from: {types}.\n\
             - Base it on the actual diff, not only on the file names.\n\
             - Keep the first line at most {max} characters.\n\
             - Reply with the commit message only, without explanations.",
            types = COMMIT_TYPES,
            max = MAX_SUBJECT_CHARS
        ),
        Language::Es => format!(
            "Escribe un mensaje de commit para los cambios de abajo.\n\
             Reglas:\n\
             - Usa el formato Conventional Commits (tipo: descripción).\n\
             - Elige el tipo entre: {types}.\n\
             - Básate en el diff real, no solo en los nombres de archivo.\n\
             - La primera línea debe tener como máximo {max} caracteres.\n\
             - Responde solo con el mensaje de commit, sin explicaciones.",
            types = COMMIT_TYPES,
            max = MAX_SUBJECT_CHARS
        ),
        Language::Fr => format!(
            "Rédigez un message de commit pour les modifications ci-dessous.\n\
             Règles :\n\
             - Utilisez le format Conventional Commits (type: description).\n\
             - Choisissez le type parmi : {types}.\n\
             - Appuyez-vous sur le diff réel, pas seulement sur les noms de fichiers.\n\
             - La première ligne fait au plus {max} caractères.\n\
             - Répondez uniquement avec le message de commit, sans explication.",
            types = COMMIT_TYPES,
            max = MAX_SUBJECT_CHARS
        ),
        Language::De => format!(
            "Schreiben Sie eine Commit-Nachricht für die folgenden Änderungen.\n\
             Regeln:\n\
             - Verwenden Sie das Conventional-Commits-Format (Typ: Beschreibung).\n\
             - Wählen Sie den Typ aus: {types}.\n\
             - Stützen Sie sich auf den tatsächlichen Diff, nicht nur auf Dateinamen.\n\
             - Die erste Zeile hat höchstens {max} Zeichen.\n\
             - Antworten Sie nur mit der Commit-Nachricht, ohne Erklärungen.",
            types = COMMIT_TYPES,
            max = MAX_SUBJECT_CHARS
        ),
        Language::PtBr => format!(
            "Escreva uma mensagem de commit para as mudanças abaixo.\n\
             Regras:\n\
             - Use o formato Conventional Commits (tipo: descrição).\n\
             - Escolha o tipo entre: {types}.\n\
             - Baseie-se no diff real, não apenas nos nomes dos arquivos.\n\
             - A primeira linha deve ter no máximo {max} caracteres.\n\
             - Responda apenas com a mensagem de commit, sem explicações.",
            types = COMMIT_TYPES,
            max = MAX_SUBJECT_CHARS
        ),
    };

    format!("{}\n\n{}", instructions, changes)
}
