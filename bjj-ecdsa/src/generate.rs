mod keypair;
mod secret_number;

pub(crate) use self::keypair::secret_scalar;
pub(crate) use self::secret_number::NonceGenerator;
