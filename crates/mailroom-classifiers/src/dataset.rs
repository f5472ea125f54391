//! Bundled default training data
//!
//! Shipped so the trainable strategies come up usable without any external
//! corpus: thirty labeled examples for the statistical strategy and a
//! smaller fifteen-example set for the linguistic pipeline.

use mailroom_core::Category;

const STATISTICAL_EXAMPLES: &[(&str, Category)] = &[
    // Sales
    (
        "Hola, me interesa conocer los precios de sus servicios",
        Category::Sales,
    ),
    ("Quiero comprar sus productos", Category::Sales),
    (
        "¿Cuánto cuesta el desarrollo de una aplicación?",
        Category::Sales,
    ),
    ("Necesito una cotización para mi proyecto", Category::Sales),
    (
        "Me gustaría contratar sus servicios de consultoría",
        Category::Sales,
    ),
    ("¿Tienen ofertas o descuentos disponibles?", Category::Sales),
    (
        "Quisiera información sobre sus paquetes de servicio",
        Category::Sales,
    ),
    (
        "Estoy interesado en adquirir su producto premium",
        Category::Sales,
    ),
    ("¿Cuál es el precio de la licencia anual?", Category::Sales),
    ("Necesito presupuesto para desarrollo web", Category::Sales),
    // Support
    ("Tengo un problema con mi cuenta", Category::Support),
    (
        "La aplicación no funciona correctamente",
        Category::Support,
    ),
    ("Necesito ayuda técnica urgente", Category::Support),
    ("Hay un error en el sistema de pagos", Category::Support),
    ("No puedo acceder a mi dashboard", Category::Support),
    (
        "El servicio está caído desde esta mañana",
        Category::Support,
    ),
    (
        "Reporto un bug en la funcionalidad de reportes",
        Category::Support,
    ),
    (
        "Necesito soporte para configurar mi cuenta",
        Category::Support,
    ),
    (
        "La integración con la API falla constantemente",
        Category::Support,
    ),
    ("Ayuda con problemas de autenticación", Category::Support),
    // Other
    ("¿En qué ciudad están ubicados?", Category::Other),
    ("Me gustaría trabajar con ustedes", Category::Other),
    ("¿Cuál es su horario de atención?", Category::Other),
    ("Información general sobre la empresa", Category::Other),
    ("Hola, solo quería saludar", Category::Other),
    ("¿Tienen vacantes disponibles?", Category::Other),
    ("Me interesa una alianza estratégica", Category::Other),
    ("¿Cuál es su visión como empresa?", Category::Other),
    (
        "Información sobre responsabilidad social",
        Category::Other,
    ),
    ("¿Participan en eventos del sector?", Category::Other),
];

const LINGUISTIC_EXAMPLES: &[(&str, Category)] = &[
    // Sales
    ("Hola, me interesa conocer los precios", Category::Sales),
    ("Quiero comprar sus servicios", Category::Sales),
    ("¿Cuánto cuesta?", Category::Sales),
    ("Necesito una cotización", Category::Sales),
    ("Me gustaría contratar", Category::Sales),
    // Support
    ("Tengo un problema técnico", Category::Support),
    ("La aplicación no funciona", Category::Support),
    ("Necesito ayuda urgente", Category::Support),
    ("Hay un error en el sistema", Category::Support),
    ("No puedo acceder", Category::Support),
    // Other
    ("¿Dónde están ubicados?", Category::Other),
    ("Información general", Category::Other),
    ("Hola", Category::Other),
    ("¿Tienen vacantes?", Category::Other),
    ("Me interesa colaborar", Category::Other),
];

fn split(examples: &[(&str, Category)]) -> (Vec<String>, Vec<Category>) {
    let messages = examples.iter().map(|(m, _)| m.to_string()).collect();
    let labels = examples.iter().map(|(_, c)| *c).collect();
    (messages, labels)
}

/// Default corpus for the statistical strategy: 30 examples, 10 per category
pub fn default_training_data() -> (Vec<String>, Vec<Category>) {
    split(STATISTICAL_EXAMPLES)
}

/// Default corpus for the linguistic pipeline: 15 examples, 5 per category
pub fn linguistic_training_data() -> (Vec<String>, Vec<Category>) {
    split(LINGUISTIC_EXAMPLES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistical_corpus_is_balanced() {
        let (messages, labels) = default_training_data();
        assert_eq!(messages.len(), 30);
        assert_eq!(labels.len(), 30);
        for category in Category::ALL {
            assert_eq!(labels.iter().filter(|l| **l == category).count(), 10);
        }
    }

    #[test]
    fn linguistic_corpus_is_balanced() {
        let (messages, labels) = linguistic_training_data();
        assert_eq!(messages.len(), 15);
        for category in Category::ALL {
            assert_eq!(labels.iter().filter(|l| **l == category).count(), 5);
        }
    }
}
