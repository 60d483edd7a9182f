use serde::{Deserialize, Serialize};

/// Уровень глубины уборки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum NivelLimpieza {
    Basica = 1,
    Media = 2,
    Profunda = 3,
    Extraordinaria = 4,
}

impl NivelLimpieza {
    pub const ALL: [NivelLimpieza; 4] = [
        NivelLimpieza::Basica,
        NivelLimpieza::Media,
        NivelLimpieza::Profunda,
        NivelLimpieza::Extraordinaria,
    ];

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::Basica),
            2 => Some(Self::Media),
            3 => Some(Self::Profunda),
            4 => Some(Self::Extraordinaria),
            _ => None,
        }
    }

    pub fn id(&self) -> i32 {
        *self as i32
    }

    /// Буква уровня для бейджей и идентификаторов методологий
    pub fn letra(&self) -> char {
        match self {
            Self::Basica => 'B',
            Self::Media => 'M',
            Self::Profunda => 'P',
            Self::Extraordinaria => 'E',
        }
    }

    pub fn nombre(&self) -> &'static str {
        match self {
            Self::Basica => "basica",
            Self::Media => "media",
            Self::Profunda => "profunda",
            Self::Extraordinaria => "extraordinaria",
        }
    }

    pub fn etiqueta(&self) -> &'static str {
        match self {
            Self::Basica => "Básica",
            Self::Media => "Media",
            Self::Profunda => "Profunda",
            Self::Extraordinaria => "Extraordinaria",
        }
    }
}

impl TryFrom<i32> for NivelLimpieza {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_id(value).ok_or_else(|| "Nivel invalido (1-4)".to_string())
    }
}

impl From<NivelLimpieza> for i32 {
    fn from(value: NivelLimpieza) -> Self {
        value.id()
    }
}

/// Буквы уровней через пробел: `[1, 3]` → `"B P"`.
///
/// Неизвестные уровни выводятся числом.
pub fn niveles_display(niveles: &[i32]) -> String {
    niveles
        .iter()
        .map(|n| match NivelLimpieza::from_id(*n) {
            Some(nivel) => nivel.letra().to_string(),
            None => n.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_follow_level_order() {
        let letters: String = NivelLimpieza::ALL.iter().map(|n| n.letra()).collect();
        assert_eq!(letters, "BMPE");
    }

    #[test]
    fn display_joins_letters() {
        assert_eq!(niveles_display(&[1, 2, 4]), "B M E");
        assert_eq!(niveles_display(&[]), "");
        assert_eq!(niveles_display(&[3, 9]), "P 9");
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&NivelLimpieza::Profunda).unwrap(), "3");
        let parsed: NivelLimpieza = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, NivelLimpieza::Media);
        assert!(serde_json::from_str::<NivelLimpieza>("5").is_err());
    }
}
