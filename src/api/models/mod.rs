// Models module - contains Spellbook, Spell, Session and the class enumeration

pub mod class_tag;
pub mod session;
pub mod spell;
pub mod spellbook;

pub use class_tag::ClassTag;
pub use session::{Session, SessionUser};
pub use spell::Spell;
pub use spellbook::{NewSpellbook, Spellbook};
