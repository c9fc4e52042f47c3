pub mod common;





#[cfg(test)]
mod test_type_bonus;

#[cfg(test)]
mod test_attack_mode;
